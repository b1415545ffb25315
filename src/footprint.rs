//! Cells and the block footprint tracker.
//!
//! A footprint is the set of one or two cells the block currently rests on.
//! Cells are kept sorted (row, then column) so two footprints covering the same
//! cells compare equal no matter in which order the cells were produced. The
//! four extremal cells are cached on every update because the roll engine reads
//! them for each move.

use std::hash::{Hash, Hasher};

use crate::error::BloxError;

/// A grid position as `(row, col)`, 0-indexed.
pub type Cell = (i32, i32);

/// Maximum number of cells a block can cover.
pub const MAX_CELLS: usize = 2;

/// The cells covered by the block plus its cached extremal cells.
///
/// Uses a fixed-size array to avoid heap allocation when snapshotting history.
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    cells: [Cell; MAX_CELLS],
    cell_count: u8,
    highest: Cell,
    lowest: Cell,
    leftmost: Cell,
    rightmost: Cell,
}

impl Footprint {
    /// A single-cell footprint, the block standing upright on `cell`.
    pub const fn standing(cell: Cell) -> Self {
        Self {
            cells: [cell; MAX_CELLS],
            cell_count: 1,
            highest: cell,
            lowest: cell,
            leftmost: cell,
            rightmost: cell,
        }
    }

    /// Builds a footprint from one or two cells.
    pub fn new(cells: &[Cell]) -> Result<Self, BloxError> {
        let first = *cells.first().ok_or(BloxError::EmptyFootprint)?;
        let mut footprint = Self::standing(first);
        footprint.update_positions(cells)?;
        Ok(footprint)
    }

    /// Replaces the covered cells and recomputes the extremal cells.
    ///
    /// Each extremal cell comes from its own scan over `new_cells` in the given
    /// order, seeded with the first cell and replaced only on a strictly better
    /// coordinate. On error the footprint is left untouched.
    pub fn update_positions(&mut self, new_cells: &[Cell]) -> Result<(), BloxError> {
        validate_shape(new_cells)?;

        let first = new_cells[0];
        let mut highest = first;
        let mut lowest = first;
        let mut leftmost = first;
        let mut rightmost = first;
        for &cell in new_cells {
            if cell.0 < highest.0 {
                highest = cell;
            }
            if cell.0 > lowest.0 {
                lowest = cell;
            }
            if cell.1 < leftmost.1 {
                leftmost = cell;
            }
            if cell.1 > rightmost.1 {
                rightmost = cell;
            }
        }

        let mut cells = [first; MAX_CELLS];
        cells[..new_cells.len()].copy_from_slice(new_cells);
        cells[..new_cells.len()].sort_unstable();

        self.cells = cells;
        self.cell_count = new_cells.len() as u8;
        self.highest = highest;
        self.lowest = lowest;
        self.leftmost = leftmost;
        self.rightmost = rightmost;
        Ok(())
    }

    /// The covered cells in canonical (sorted) order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.cell_count as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cell_count as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    /// Cell with the smallest row.
    #[inline]
    pub fn highest(&self) -> Cell {
        self.highest
    }

    /// Cell with the largest row.
    #[inline]
    pub fn lowest(&self) -> Cell {
        self.lowest
    }

    /// Cell with the smallest column.
    #[inline]
    pub fn leftmost(&self) -> Cell {
        self.leftmost
    }

    /// Cell with the largest column.
    #[inline]
    pub fn rightmost(&self) -> Cell {
        self.rightmost
    }
}

/// Accepts one cell, or two cells sharing a row or column and one step apart.
fn validate_shape(cells: &[Cell]) -> Result<(), BloxError> {
    match cells {
        [] => Err(BloxError::EmptyFootprint),
        [_] => Ok(()),
        [a, b] if is_adjacent(*a, *b) => Ok(()),
        _ => Err(BloxError::InvalidFootprint {
            cells: cells.to_vec(),
        }),
    }
}

fn is_adjacent(a: Cell, b: Cell) -> bool {
    (a.0 == b.0 && (a.1 - b.1).abs() == 1) || (a.1 == b.1 && (a.0 - b.0).abs() == 1)
}

// equality and hashing only look at the canonical cells, never the cached extremes
impl PartialEq for Footprint {
    fn eq(&self, other: &Self) -> bool {
        self.cells() == other.cells()
    }
}

impl Eq for Footprint {}

impl Hash for Footprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells().hash(state);
    }
}
