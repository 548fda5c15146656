//! Formula expression AST and grammar-faithful printing

use std::fmt;
use tabula_core::{CellError, Position};

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Single cell reference
    CellRef(Position),
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// The operator's source character
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl UnaryOperator {
    /// The operator's source character
    pub fn symbol(&self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

/// Printing precedence levels, tighter last
///
/// These are printing levels, not grammar levels: subtraction and division
/// get their own rows because their right operands re-parse differently
/// without parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precedence {
    Add,
    Sub,
    Mul,
    Div,
    Unary,
    Atom,
}

// Parenthesisation rules, one bit per child side
const PR_NONE: u8 = 0b00;
const PR_LEFT: u8 = 0b01;
const PR_RIGHT: u8 = 0b10;
const PR_BOTH: u8 = PR_LEFT | PR_RIGHT;

// PRECEDENCE_RULES[parent][child] says whether parentheses must be emitted
// between a parent and a child of the given precedences. A bit is set when
// removing the parentheses would change how the printed text re-parses:
//   A-(B+C)  never okay          A+(B+C)  always okay
//   A/(B*C)  never okay          A*(B*C)  always okay
//   -(A+B)   never okay          -(A*B)   always okay
// Left and right children differ where the operator is not associative:
//   (A-B)-C  okay                A-(B-C)  not okay
const PRECEDENCE_RULES: [[u8; 6]; 6] = [
    /* Add   */ [PR_NONE, PR_NONE, PR_NONE, PR_NONE, PR_NONE, PR_NONE],
    /* Sub   */ [PR_RIGHT, PR_RIGHT, PR_NONE, PR_NONE, PR_NONE, PR_NONE],
    /* Mul   */ [PR_BOTH, PR_BOTH, PR_NONE, PR_NONE, PR_NONE, PR_NONE],
    /* Div   */ [PR_BOTH, PR_BOTH, PR_RIGHT, PR_RIGHT, PR_NONE, PR_NONE],
    /* Unary */ [PR_BOTH, PR_BOTH, PR_NONE, PR_NONE, PR_NONE, PR_NONE],
    /* Atom  */ [PR_NONE, PR_NONE, PR_NONE, PR_NONE, PR_NONE, PR_NONE],
];

impl Expr {
    fn precedence(&self) -> Precedence {
        match self {
            Expr::Number(_) | Expr::CellRef(_) => Precedence::Atom,
            Expr::UnaryOp { .. } => Precedence::Unary,
            Expr::BinaryOp { op, .. } => match op {
                BinaryOperator::Add => Precedence::Add,
                BinaryOperator::Subtract => Precedence::Sub,
                BinaryOperator::Multiply => Precedence::Mul,
                BinaryOperator::Divide => Precedence::Div,
            },
        }
    }

    fn write_formula(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent: Precedence,
        right_child: bool,
    ) -> fmt::Result {
        let precedence = self.precedence();
        let mask = if right_child { PR_RIGHT } else { PR_LEFT };
        let parens_needed = PRECEDENCE_RULES[parent as usize][precedence as usize] & mask != 0;

        if parens_needed {
            write!(f, "(")?;
        }

        match self {
            Expr::Number(n) => write!(f, "{}", n)?,
            Expr::CellRef(pos) => {
                if pos.is_valid() {
                    write!(f, "{}", pos)?;
                } else {
                    write!(f, "{}", CellError::Ref)?;
                }
            }
            Expr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.write_formula(f, precedence, false)?;
            }
            Expr::BinaryOp { op, left, right } => {
                left.write_formula(f, precedence, false)?;
                write!(f, "{}", op.symbol())?;
                right.write_formula(f, precedence, true)?;
            }
        }

        if parens_needed {
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl fmt::Display for Expr {
    /// Canonical source form; parentheses only where re-parsing demands them
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_formula(f, Precedence::Atom, false)
    }
}

/// Collect every cell position mentioned by the expression, in syntax order
pub(crate) fn collect_references(expr: &Expr, refs: &mut Vec<Position>) {
    match expr {
        Expr::Number(_) => {}
        Expr::CellRef(pos) => refs.push(*pos),
        Expr::UnaryOp { operand, .. } => collect_references(operand, refs),
        Expr::BinaryOp { left, right, .. } => {
            collect_references(left, refs);
            collect_references(right, refs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn printed(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    #[test]
    fn test_print_atoms() {
        assert_eq!(printed("42"), "42");
        assert_eq!(printed("3.5"), "3.5");
        assert_eq!(printed("A1"), "A1");
    }

    #[test]
    fn test_print_keeps_required_parens() {
        assert_eq!(printed("2-(3-1)"), "2-(3-1)");
        assert_eq!(printed("2-(3+1)"), "2-(3+1)");
        assert_eq!(printed("(1+2)*3"), "(1+2)*3");
        assert_eq!(printed("3*(1+2)"), "3*(1+2)");
        assert_eq!(printed("1/(2*3)"), "1/(2*3)");
        assert_eq!(printed("1/(2/3)"), "1/(2/3)");
        assert_eq!(printed("-(1+2)"), "-(1+2)");
        assert_eq!(printed("+(1-2)"), "+(1-2)");
    }

    #[test]
    fn test_print_drops_redundant_parens() {
        assert_eq!(printed("(1+2)+3"), "1+2+3");
        assert_eq!(printed("1+(2+3)"), "1+2+3");
        assert_eq!(printed("1+(2-3)"), "1+2-3");
        assert_eq!(printed("(2-3)-1"), "2-3-1");
        assert_eq!(printed("(2*3)/4"), "2*3/4");
        assert_eq!(printed("2*(3*4)"), "2*3*4");
        assert_eq!(printed("-(1*2)"), "-1*2");
        assert_eq!(printed("-(A1/B2)"), "-A1/B2");
        assert_eq!(printed("(1*2)+(3*4)"), "1*2+3*4");
    }

    #[test]
    fn test_print_invalid_reference() {
        let expr = Expr::CellRef(Position::new(20_000, 0));
        assert_eq!(expr.to_string(), "#REF!");
    }

    #[test]
    fn test_print_is_idempotent() {
        for input in [
            "1+2*3",
            "(1+2)*3",
            "2-(3-1)",
            "1/(2/3)",
            "-(A1+B2)*C3",
            "+(1+2)/3",
            "--5",
            "A1-B1-C1",
        ] {
            let once = printed(input);
            assert_eq!(printed(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_collect_references() {
        let expr = parse("A1+B2*A1-C3").unwrap();
        let mut refs = Vec::new();
        collect_references(&expr, &mut refs);
        assert_eq!(
            refs,
            vec![
                Position::new(0, 0),
                Position::new(1, 1),
                Position::new(0, 0),
                Position::new(2, 2),
            ]
        );
    }
}
