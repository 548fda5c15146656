//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing a formula expression
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Lexical or syntactic parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Cell reference token with out-of-range coordinates (e.g. `ZZZ1`)
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),
}

impl From<FormulaError> for tabula_core::Error {
    fn from(e: FormulaError) -> Self {
        match e {
            FormulaError::Parse(msg) => tabula_core::Error::Parse(msg),
            FormulaError::InvalidReference(msg) => tabula_core::Error::InvalidReference(msg),
        }
    }
}
