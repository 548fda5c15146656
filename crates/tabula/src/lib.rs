//! # tabula
//!
//! An in-memory spreadsheet engine: a two-dimensional grid of cells holding
//! text or arithmetic formulas that reference other cells.
//!
//! The engine keeps a dependency graph between formula cells and their
//! referents, rejects updates that would create a circular dependency
//! before committing anything, evaluates formulas lazily with memoized
//! results, and invalidates downstream caches when an input changes.
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let mut sheet = Sheet::new();
//!
//! sheet.set("A1", "3").unwrap();
//! sheet.set("B1", "=A1*2+1").unwrap();
//! assert_eq!(sheet.value("B1").unwrap(), CellValue::Number(7.0));
//!
//! // Changing an input invalidates everything computed from it
//! sheet.set("A1", "10").unwrap();
//! assert_eq!(sheet.value("B1").unwrap(), CellValue::Number(21.0));
//!
//! // A cycle is rejected and the sheet is left untouched
//! assert!(sheet.set("A1", "=B1").is_err());
//! assert_eq!(sheet.value("A1").unwrap(), CellValue::Number(10.0));
//! ```

pub mod cell;
pub mod prelude;
mod printer;
pub mod sheet;

pub use cell::Cell;
pub use sheet::Sheet;

// Re-export core types
pub use tabula_core::{
    CellError, CellValue, Error, Position, Result, Size, ESCAPE_SIGN, FORMULA_SIGN, MAX_COLS,
    MAX_POS_LETTER_COUNT, MAX_ROWS,
};

// Re-export formula types
pub use tabula_formula::{CellLookup, Formula, FormulaError, FormulaResult};
