//! Error types for the tabula engine

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported at the engine API boundary
///
/// Each of these leaves the sheet in its pre-call state.
#[derive(Debug, Error)]
pub enum Error {
    /// Position outside the sheet bounds
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Formula parse error (lexical or syntactic)
    #[error("Formula parse error: {0}")]
    Parse(String),

    /// Well-formed cell reference token with out-of-range coordinates
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// The update would create a cycle in the dependency graph
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(String),
}
