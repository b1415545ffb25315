//! Level grid and its textual forms.
//!
//! The grid is a flat array of markers indexed row-major:
//! `idx = row * cols + col`. Each marker has a two-character code which is
//! the machine-readable wire format of a level:
//!
//! - `"  "` empty
//! - `"XX"` floor the block has rolled over
//! - `"II"` start cell
//! - `"GG"` goal cells

use crate::footprint::Cell;

/// What a single grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    #[default]
    Empty,
    Floor,
    Start,
    Goal,
}

impl Marker {
    /// Two-character code used by the machine form.
    pub const fn code(self) -> &'static str {
        match self {
            Marker::Empty => "  ",
            Marker::Floor => "XX",
            Marker::Start => "II",
            Marker::Goal => "GG",
        }
    }

    /// First character of the code, used by the visual form.
    pub const fn symbol(self) -> char {
        match self {
            Marker::Empty => ' ',
            Marker::Floor => 'X',
            Marker::Start => 'I',
            Marker::Goal => 'G',
        }
    }
}

/// A fixed-size board of markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Marker>,
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Marker::Empty; rows * cols],
        }
    }

    /// Builds a grid from row-major markers, or `None` if the count is wrong.
    pub fn from_markers(rows: usize, cols: usize, cells: Vec<Marker>) -> Option<Self> {
        (cells.len() == rows * cols).then_some(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Converts a cell to its flat index, or `None` when off the board.
    #[inline]
    fn cell_to_idx(&self, (row, col): Cell) -> Option<usize> {
        let in_rows = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let in_cols = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some(in_rows * self.cols + in_cols)
    }

    /// Marker at `cell`; off-board cells read as empty.
    pub fn get(&self, cell: Cell) -> Marker {
        self.cell_to_idx(cell)
            .map_or(Marker::Empty, |idx| self.cells[idx])
    }

    /// Writes `marker` at `cell`. Off-board cells are ignored.
    pub fn set(&mut self, cell: Cell, marker: Marker) {
        if let Some(idx) = self.cell_to_idx(cell) {
            self.cells[idx] = marker;
        }
    }

    /// Row-major markers.
    pub fn markers(&self) -> &[Marker] {
        &self.cells
    }

    /// Iterates rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Marker]> {
        // max(1) keeps chunks() valid for a zero-column grid
        self.cells.chunks(self.cols.max(1))
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&marker| marker != Marker::Empty)
            .count()
    }

    /// Cells holding `marker`, in row-major order.
    pub fn cells_with(&self, marker: Marker) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m == marker)
            .map(|(idx, _)| ((idx / self.cols) as i32, (idx % self.cols) as i32))
            .collect()
    }
}

/// Machine form: each cell's full two-character code, one line per row.
pub fn format_machine(grid: &Grid) -> String {
    let mut output = String::with_capacity(grid.rows() * (grid.cols() * 2 + 1));
    for row in grid.iter_rows() {
        for marker in row {
            output.push_str(marker.code());
        }
        output.push('\n');
    }
    output
}

/// Visual form: the first character of each code, one line per row.
pub fn format_visual(grid: &Grid) -> String {
    let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in grid.iter_rows() {
        output.extend(row.iter().map(|marker| marker.symbol()));
        output.push('\n');
    }
    output
}
