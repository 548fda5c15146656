//! Cell content and memoized values

use std::cell::RefCell;

use ahash::AHashSet;
use tabula_core::{CellValue, Position, ESCAPE_SIGN, FORMULA_SIGN};
use tabula_formula::{CellLookup, Formula, FormulaResult};

/// The content of a cell: empty, literal text, or a parsed formula
///
/// Formula content carries its own memo; the cache is separate from the
/// immutable AST so a read-only lookup can still memoize.
#[derive(Debug)]
pub(crate) enum Content {
    Empty,
    Text(String),
    Formula {
        formula: Formula,
        /// Memoized evaluation result; `None` when stale
        cache: RefCell<Option<CellValue>>,
    },
}

impl Content {
    /// Parse raw cell text into content
    ///
    /// The empty string is empty content; `=`-prefixed text longer than one
    /// character parses as a formula (errors propagate, leaving the caller's
    /// cell untouched); anything else is literal text, a leading `'`
    /// included.
    pub(crate) fn parse(text: &str) -> FormulaResult<Self> {
        if text.is_empty() {
            return Ok(Content::Empty);
        }

        if let Some(expression) = text.strip_prefix(FORMULA_SIGN) {
            if !expression.is_empty() {
                let formula = Formula::parse(expression)?;
                return Ok(Content::Formula {
                    formula,
                    cache: RefCell::new(None),
                });
            }
        }

        Ok(Content::Text(text.to_string()))
    }
}

/// A single cell of a [`Sheet`](crate::Sheet)
#[derive(Debug)]
pub struct Cell {
    content: Content,
    /// Positions of cells whose formulas mention this one; maintained by Sheet
    pub(crate) referrers: AHashSet<Position>,
}

impl Cell {
    pub(crate) fn new() -> Self {
        Self {
            content: Content::Empty,
            referrers: AHashSet::new(),
        }
    }

    pub(crate) fn set_content(&mut self, content: Content) {
        self.content = content;
    }

    /// The cell's observable value
    ///
    /// Empty cells read as the empty string; text cells as their text with a
    /// leading `'` stripped; formula cells as the memoized evaluation result,
    /// computed on demand.
    pub fn value(&self, cells: &dyn CellLookup) -> CellValue {
        match &self.content {
            Content::Empty => CellValue::default(),
            Content::Text(text) => match text.strip_prefix(ESCAPE_SIGN) {
                Some(escaped) => CellValue::String(escaped.to_string()),
                None => CellValue::String(text.clone()),
            },
            Content::Formula { formula, cache } => {
                if let Some(value) = cache.borrow().clone() {
                    return value;
                }
                let value = match formula.evaluate(cells) {
                    Ok(number) => CellValue::Number(number),
                    Err(error) => CellValue::Error(error),
                };
                *cache.borrow_mut() = Some(value.clone());
                value
            }
        }
    }

    /// The cell's raw text
    ///
    /// Formula cells yield `=` followed by the canonicalized expression.
    pub fn text(&self) -> String {
        match &self.content {
            Content::Empty => String::new(),
            Content::Text(text) => text.clone(),
            Content::Formula { formula, .. } => {
                format!("{}{}", FORMULA_SIGN, formula.expression())
            }
        }
    }

    /// Positions this cell's formula mentions (sorted, deduplicated)
    pub fn referenced_cells(&self) -> &[Position] {
        match &self.content {
            Content::Formula { formula, .. } => formula.referenced_cells(),
            Content::Empty | Content::Text(_) => &[],
        }
    }

    /// Whether any other cell's formula mentions this one
    pub fn is_referenced(&self) -> bool {
        !self.referrers.is_empty()
    }

    /// Mark the memoized value stale; idempotent
    pub(crate) fn invalidate(&self) {
        if let Content::Formula { cache, .. } = &self.content {
            *cache.borrow_mut() = None;
        }
    }
}
