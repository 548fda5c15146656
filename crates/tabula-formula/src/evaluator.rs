//! Formula evaluator
//!
//! Evaluates formula ASTs to produce numbers, short-circuiting on
//! [`CellError`].

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use tabula_core::{CellError, CellValue, Position};

/// Read access to cell values during evaluation
///
/// Implemented by the sheet; evaluation never mutates observable state.
pub trait CellLookup {
    /// Current value of the cell at `pos`, or `None` when no cell exists there
    fn value_at(&self, pos: Position) -> Option<CellValue>;
}

/// Evaluate a formula expression against the given cells
pub fn evaluate(expr: &Expr, cells: &dyn CellLookup) -> Result<f64, CellError> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::CellRef(pos) => evaluate_reference(*pos, cells),

        Expr::UnaryOp { op, operand } => {
            let operand = evaluate(operand, cells)?;
            Ok(match op {
                UnaryOperator::Plus => operand,
                UnaryOperator::Negate => -operand,
            })
        }

        Expr::BinaryOp { op, left, right } => {
            let lhs = evaluate(left, cells)?;
            let rhs = evaluate(right, cells)?;
            let result = match op {
                BinaryOperator::Add => lhs + rhs,
                BinaryOperator::Subtract => lhs - rhs,
                BinaryOperator::Multiply => lhs * rhs,
                BinaryOperator::Divide => lhs / rhs,
            };
            // Division by zero and overflow both surface as #DIV/0!
            if result.is_finite() {
                Ok(result)
            } else {
                Err(CellError::Div0)
            }
        }
    }
}

fn evaluate_reference(pos: Position, cells: &dyn CellLookup) -> Result<f64, CellError> {
    if !pos.is_valid() {
        return Err(CellError::Ref);
    }

    let value = match cells.value_at(pos) {
        Some(value) => value,
        None => return Ok(0.0),
    };

    match value {
        CellValue::Number(n) => Ok(n),
        // Upstream errors propagate as #VALUE!, whatever their category
        CellValue::Error(_) => Err(CellError::Value),
        CellValue::String(s) => {
            if s.is_empty() {
                Ok(0.0)
            } else {
                // The whole string must be a number; trailing garbage fails
                s.parse::<f64>().map_err(|_| CellError::Value)
            }
        }
    }
}
