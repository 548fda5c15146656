//! # tabula-core
//!
//! Core data structures for the tabula spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout tabula:
//! - [`Position`] and [`Size`] - Cell addressing and sheet bounds
//! - [`CellValue`] - The observable value of a cell (string, number, error)
//! - [`CellError`] - Formula runtime errors (`#REF!`, `#VALUE!`, `#DIV/0!`)
//! - [`Error`] - API boundary errors
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{CellValue, Position};
//!
//! let pos = Position::parse("B2").unwrap();
//! assert_eq!(pos.row, 1);
//! assert_eq!(pos.col, 1);
//! assert_eq!(pos.to_string(), "B2");
//!
//! let value = CellValue::Number(42.5);
//! assert_eq!(value.to_string(), "42.5");
//! ```

pub mod error;
pub mod position;
pub mod value;

// Re-exports for convenience
pub use error::{Error, Result};
pub use position::{Position, Size};
pub use value::{CellError, CellValue};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum number of column letters in an A1-style position
pub const MAX_POS_LETTER_COUNT: usize = 3;

/// Leading character that marks a cell's text as a formula
pub const FORMULA_SIGN: char = '=';

/// Leading character that escapes cell text from formula interpretation
pub const ESCAPE_SIGN: char = '\'';
