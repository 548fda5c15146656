//! # tabula-formula
//!
//! Formula parser and evaluator for tabula.
//!
//! This crate provides:
//! - Expression parsing (text → AST)
//! - Grammar-faithful printing (AST → canonical text)
//! - Evaluation against a [`CellLookup`]
//! - Referenced-cell extraction for dependency tracking
//!
//! ## Example
//!
//! ```rust
//! use tabula_formula::Formula;
//!
//! let formula = Formula::parse("1+2 * A1").unwrap();
//! assert_eq!(formula.expression(), "1+2*A1");
//! assert_eq!(formula.referenced_cells().len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
mod parser;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, CellLookup};

use std::fmt;
use tabula_core::{CellError, Position};

/// A parsed formula expression
///
/// Owns the AST and the sorted, deduplicated list of cell positions the
/// expression mentions.
#[derive(Debug, Clone)]
pub struct Formula {
    expr: Expr,
    referenced: Vec<Position>,
}

impl Formula {
    /// Parse an expression string (without a leading `=`)
    ///
    /// Returns [`FormulaError::Parse`] for lexical or syntactic failures and
    /// [`FormulaError::InvalidReference`] for a cell token whose coordinates
    /// are out of range.
    pub fn parse(expression: &str) -> FormulaResult<Self> {
        let expr = parser::parse(expression)?;

        let mut referenced = Vec::new();
        ast::collect_references(&expr, &mut referenced);
        referenced.sort_unstable();
        referenced.dedup();
        referenced.retain(Position::is_valid);

        Ok(Self { expr, referenced })
    }

    /// Evaluate the formula against the given cells
    ///
    /// Runtime errors come back as [`CellError`] values, never panics.
    pub fn evaluate(&self, cells: &dyn CellLookup) -> Result<f64, CellError> {
        evaluator::evaluate(&self.expr, cells)
    }

    /// The canonicalized source form of the expression (no leading `=`)
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    /// The sorted, deduplicated, in-range cell positions the expression mentions
    pub fn referenced_cells(&self) -> &[Position] {
        &self.referenced
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
