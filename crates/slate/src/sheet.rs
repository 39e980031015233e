//! The sheet: cell grid, dependency graph, and the atomic write protocol

use crate::cell::Cell;
use slate_core::{Error, Position, Result, Size, Value};
use slate_formula::DependencyGraph;
use std::io;

/// A two-dimensional table of cells with consistent, cached, on-demand
/// evaluation and cycle prevention
///
/// The sheet owns the cells and the dependency graph and keeps the two
/// consistent under every mutation: a write either installs the new cell
/// with its edges recorded and every transitive dependent's cache dropped,
/// or fails leaving sheet and graph exactly as they were.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Ragged rows; an absent entry is a never-touched cell
    cells: Vec<Vec<Option<Cell>>>,
    graph: DependencyGraph,
    printable_size: Size,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cell at `pos` with one built from `text`
    ///
    /// The atomic unit of change. The write protocol:
    /// 1. reject invalid positions;
    /// 2. parse the candidate cell (a malformed formula aborts with no
    ///    side effect);
    /// 3. reject direct self-reference;
    /// 4. materialize empty placeholder cells for referents that have never
    ///    been written;
    /// 5. unlink the old outgoing edges;
    /// 6. link the candidate's edges;
    /// 7. test for a cycle through `pos` and roll everything back on failure;
    /// 8. drop the cache of `pos` and every transitive dependent;
    /// 9. place the new cell and grow the printable area.
    pub fn set_cell(&mut self, pos: Position, text: impl Into<String>) -> Result<()> {
        validate_position(pos)?;

        let mut cell = Cell::new();
        cell.set(text)?;

        let new_refs = cell.referenced_cells().to_vec();
        if new_refs.contains(&pos) {
            return Err(Error::CircularReference(pos));
        }

        let saved_size = self.printable_size;
        let mut newly_empty = Vec::new();
        for &next in &new_refs {
            if self.cell_ref(next).is_none() {
                self.place_cell(next, Cell::new());
                newly_empty.push(next);
            }
        }

        let old_refs = self.graph.forward_refs(pos);
        for &next in &old_refs {
            self.graph.remove_dependency(pos, next);
        }

        self.graph.add_cell(pos);
        for &next in &new_refs {
            self.graph.add_cell(next);
            self.graph.add_dependency(pos, next);
        }

        if self.graph.has_cycle_from(pos) {
            for &next in &new_refs {
                self.graph.remove_dependency(pos, next);
            }
            for &placeholder in &newly_empty {
                self.drop_cell(placeholder);
                if self.graph.is_isolated(placeholder) {
                    self.graph.remove_cell(placeholder);
                }
            }
            for &next in &old_refs {
                self.graph.add_cell(next);
                self.graph.add_dependency(pos, next);
            }
            self.printable_size = saved_size;
            return Err(Error::CircularReference(pos));
        }

        // Reaches pos itself and everything that transitively references it.
        // The old cell is still in place, so dependents recompute only after
        // the swap below.
        let cells = &self.cells;
        self.graph.invalidate_reverse(pos, |next| {
            if let Some(cell) = cell_in(cells, next) {
                cell.reset_cache();
            }
        });

        self.place_cell(pos, cell);
        Ok(())
    }

    /// The cell at `pos`, if one has ever been written or referenced
    pub fn cell(&self, pos: Position) -> Result<Option<&Cell>> {
        validate_position(pos)?;
        Ok(self.cell_ref(pos))
    }

    /// The value at `pos`; the empty string for untouched cells
    pub fn value(&self, pos: Position) -> Result<Value> {
        validate_position(pos)?;
        Ok(self
            .cell_ref(pos)
            .map(|cell| cell.value(self))
            .unwrap_or_default())
    }

    /// The text at `pos`; empty for untouched cells
    pub fn text(&self, pos: Position) -> Result<String> {
        validate_position(pos)?;
        Ok(self.cell_ref(pos).map(Cell::text).unwrap_or_default())
    }

    /// Drop the cell at `pos` from the grid
    ///
    /// The dependency graph is not trimmed: a cleared position lives on as an
    /// empty-resolving node until a later write overwrites it or drops it
    /// from the referring cell's edge set. Clears on the printable boundary
    /// shrink the printable area; interior clears leave it unchanged.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        validate_position(pos)?;
        self.drop_cell(pos);
        Ok(())
    }

    /// The bounding box of all occupied cells
    pub fn printable_size(&self) -> Size {
        self.printable_size
    }

    /// Iterate over the occupied cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, slot)| {
                slot.as_ref()
                    .map(|cell| (Position::new(r as u32, c as u16), cell))
            })
        })
    }

    /// Write the printable area as TAB-separated cell values, one line per row
    pub fn print_values(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.print_with(out, |cell| cell.value(self).to_string())
    }

    /// Write the printable area as TAB-separated cell texts, one line per row
    pub fn print_texts(&self, out: &mut impl io::Write) -> io::Result<()> {
        self.print_with(out, Cell::text)
    }

    /// Resolve a reference during formula evaluation: untouched cells
    /// read as zero
    pub(crate) fn lookup_value(&self, pos: Position) -> Value {
        match self.cell_ref(pos) {
            Some(cell) => cell.value(self),
            None => Value::Number(0.0),
        }
    }

    fn cell_ref(&self, pos: Position) -> Option<&Cell> {
        cell_in(&self.cells, pos)
    }

    fn place_cell(&mut self, pos: Position, cell: Cell) {
        let row_idx = pos.row as usize;
        if row_idx >= self.cells.len() {
            self.cells.resize_with(row_idx + 1, Vec::new);
        }
        let row = &mut self.cells[row_idx];
        let col_idx = pos.col as usize;
        if col_idx >= row.len() {
            row.resize_with(col_idx + 1, || None);
        }
        row[col_idx] = Some(cell);
        self.printable_size.expand_to(pos);
    }

    fn drop_cell(&mut self, pos: Position) {
        if let Some(slot) = self
            .cells
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            if slot.take().is_some() && self.printable_size.on_edge(pos) {
                self.shrink_printable();
            }
        }
    }

    /// Recompute the bounding box of occupied cells from scratch
    fn shrink_printable(&mut self) {
        let mut size = Size::default();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, slot) in row.iter().enumerate() {
                if slot.is_some() {
                    size.expand_to(Position::new(r as u32, c as u16));
                }
            }
        }
        self.printable_size = size;
    }

    fn print_with(
        &self,
        out: &mut impl io::Write,
        render: impl Fn(&Cell) -> String,
    ) -> io::Result<()> {
        for r in 0..self.printable_size.rows {
            for c in 0..self.printable_size.cols {
                if c > 0 {
                    write!(out, "\t")?;
                }
                if let Some(cell) = self.cell_ref(Position::new(r, c)) {
                    write!(out, "{}", render(cell))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn validate_position(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidPosition(pos))
    }
}

fn cell_in(cells: &[Vec<Option<Cell>>], pos: Position) -> Option<&Cell> {
    cells
        .get(pos.row as usize)
        .and_then(|row| row.get(pos.col as usize))
        .and_then(|slot| slot.as_ref())
}
