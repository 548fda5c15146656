//! Sheet orchestration
//!
//! The sheet owns the position → cell mapping and keeps the dependency
//! graph, cycle detection, and cache invalidation consistent across every
//! write.

use std::io;

use ahash::{AHashMap, AHashSet};
use tabula_core::{CellValue, Error, Position, Result, Size};
use tabula_formula::CellLookup;

use crate::cell::{Cell, Content};
use crate::printer;

/// An in-memory spreadsheet
///
/// Cells exist in the map once set, or once auto-inserted because another
/// cell's formula references them. The forward edges of the dependency
/// graph live in each formula cell's referent list; the reverse edges in
/// each cell's referrer set. The forward graph is acyclic at all times:
/// an update that would close a cycle is rejected before any state changes.
#[derive(Debug, Default)]
pub struct Sheet {
    cells: AHashMap<Position, Cell>,
}

/// DFS colouring for the cycle check; unvisited cells are white
enum DfsColor {
    Grey,
    Black,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    // === Cell access ===

    /// Get the cell at `pos`, or `None` if nothing has been set there
    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>> {
        if !pos.is_valid() {
            return Err(invalid_position(pos));
        }
        Ok(self.cells.get(&pos))
    }

    /// The value of the cell at `pos`; absent cells read as empty
    pub fn cell_value(&self, pos: Position) -> Result<CellValue> {
        Ok(self
            .get_cell(pos)?
            .map(|cell| cell.value(self))
            .unwrap_or_default())
    }

    /// The raw text of the cell at `pos`; absent cells read as empty
    pub fn cell_text(&self, pos: Position) -> Result<String> {
        Ok(self.get_cell(pos)?.map(Cell::text).unwrap_or_default())
    }

    /// Number of cells present in the map, auto-inserted ones included
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been set
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    // === Cell modification ===

    /// Set the cell at `pos` from raw text
    ///
    /// Empty text clears the content, `=`-prefixed text parses as a formula,
    /// anything else is stored verbatim as text. The update is all-or-nothing:
    /// a parse failure or a [`CircularDependency`](Error::CircularDependency)
    /// leaves every cell, edge, and cache exactly as it was.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        if !pos.is_valid() {
            return Err(invalid_position(pos));
        }

        // Stage the new content before touching any state
        let content = Content::parse(text)?;

        if let Content::Formula { formula, .. } = &content {
            self.check_cycle(pos, formula.referenced_cells())?;
        }

        let old_referents: Vec<Position> = self
            .cells
            .get(&pos)
            .map(|cell| cell.referenced_cells().to_vec())
            .unwrap_or_default();

        // Commit
        let cell = self.cells.entry(pos).or_insert_with(Cell::new);
        cell.set_content(content);
        let new_referents: Vec<Position> = cell.referenced_cells().to_vec();

        // Every referent must resolve to a live cell, so that changing it
        // later can reach this cell's cache
        for &referent in &new_referents {
            self.cells.entry(referent).or_insert_with(Cell::new);
        }

        // Rewire reverse edges
        for referent in old_referents {
            if let Some(cell) = self.cells.get_mut(&referent) {
                cell.referrers.remove(&pos);
            }
        }
        for &referent in &new_referents {
            if let Some(cell) = self.cells.get_mut(&referent) {
                cell.referrers.insert(pos);
            }
        }

        // The old memoized value and everything computed from it are stale
        self.invalidate_from(pos);

        Ok(())
    }

    /// Reset the cell at `pos` to empty
    ///
    /// The map entry is dropped unless other formulas still reference it, in
    /// which case an empty cell remains so those referents keep resolving.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        if !pos.is_valid() {
            return Err(invalid_position(pos));
        }

        let Some(cell) = self.cells.get_mut(&pos) else {
            return Ok(());
        };

        let old_referents = cell.referenced_cells().to_vec();
        cell.set_content(Content::Empty);

        for referent in old_referents {
            if let Some(cell) = self.cells.get_mut(&referent) {
                cell.referrers.remove(&pos);
            }
        }

        self.invalidate_from(pos);

        if self.cells.get(&pos).is_some_and(|cell| !cell.is_referenced()) {
            self.cells.remove(&pos);
        }

        Ok(())
    }

    // === String-address conveniences ===

    /// Set a cell by A1-style address
    pub fn set(&mut self, address: &str, text: &str) -> Result<()> {
        self.set_cell(address.parse()?, text)
    }

    /// Get a cell value by A1-style address
    pub fn value(&self, address: &str) -> Result<CellValue> {
        self.cell_value(address.parse()?)
    }

    /// Get a cell's raw text by A1-style address
    pub fn text(&self, address: &str) -> Result<String> {
        self.cell_text(address.parse()?)
    }

    // === Printing ===

    /// The bounding rectangle containing every present cell
    pub fn printable_size(&self) -> Size {
        let mut size = Size::default();
        for pos in self.cells.keys() {
            size.rows = size.rows.max(pos.row + 1);
            size.cols = size.cols.max(pos.col + 1);
        }
        size
    }

    /// Tab-delimited values of the printable rectangle
    pub fn print_values(&self) -> String {
        printer::values_string(self)
    }

    /// Tab-delimited texts of the printable rectangle
    pub fn print_texts(&self) -> String {
        printer::texts_string(self)
    }

    /// Write the tab-delimited values to a writer
    pub fn write_values<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(printer::values_string(self).as_bytes())
    }

    /// Write the tab-delimited texts to a writer
    pub fn write_texts<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(printer::texts_string(self).as_bytes())
    }

    // === Dependency graph maintenance ===

    /// Reject the prospective edges `target → new_referents` if they would
    /// close a cycle
    ///
    /// Three-colour DFS over the graph as it would look after the update:
    /// the target starts grey and the committed edges of every other cell
    /// are followed as-is, with absent cells as leaves. Reaching a grey
    /// cell means a cycle; the sheet is untouched either way.
    fn check_cycle(&self, target: Position, new_referents: &[Position]) -> Result<()> {
        let mut colors = AHashMap::new();
        colors.insert(target, DfsColor::Grey);

        for &referent in new_referents {
            self.paint(referent, target, &mut colors)?;
        }

        Ok(())
    }

    fn paint(
        &self,
        pos: Position,
        target: Position,
        colors: &mut AHashMap<Position, DfsColor>,
    ) -> Result<()> {
        match colors.get(&pos) {
            Some(DfsColor::Black) => return Ok(()),
            Some(DfsColor::Grey) => return Err(Error::CircularDependency(target.to_string())),
            None => {}
        }

        colors.insert(pos, DfsColor::Grey);
        if let Some(cell) = self.cells.get(&pos) {
            for &next in cell.referenced_cells() {
                self.paint(next, target, colors)?;
            }
        }
        colors.insert(pos, DfsColor::Black);

        Ok(())
    }

    /// Mark the cache of `pos` and of its transitive reverse-edge closure stale
    fn invalidate_from(&self, pos: Position) {
        let mut visited = AHashSet::new();
        self.invalidate_visit(pos, &mut visited);
    }

    fn invalidate_visit(&self, pos: Position, visited: &mut AHashSet<Position>) {
        if !visited.insert(pos) {
            return;
        }
        if let Some(cell) = self.cells.get(&pos) {
            cell.invalidate();
            for &referrer in &cell.referrers {
                self.invalidate_visit(referrer, visited);
            }
        }
    }
}

impl CellLookup for Sheet {
    fn value_at(&self, pos: Position) -> Option<CellValue> {
        self.cells.get(&pos).map(|cell| cell.value(self))
    }
}

fn invalid_position(pos: Position) -> Error {
    Error::InvalidPosition(format!("({}, {})", pos.row, pos.col))
}
