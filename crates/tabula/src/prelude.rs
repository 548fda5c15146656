//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellError,
    CellLookup,
    CellValue,
    // Error types
    Error,
    // Formula types
    Formula,
    FormulaError,
    Position,
    Result,
    // Main types
    Sheet,
    Size,
};
