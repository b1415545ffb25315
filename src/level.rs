//! Finished levels: the painted board plus the solution that solves it.

use crate::engine::Move;
use crate::error::BloxError;
use crate::footprint::{Cell, Footprint};
use crate::game::{origin_for, Game};
use crate::grid::{format_visual, Grid, Marker};

/// A generated level.
///
/// The block starts standing on the board's centre cell; rolling it through
/// `solution` (skipping the leading `None`) lands it on the Goal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    grid: Grid,
    solution: Vec<Option<Move>>,
}

impl Level {
    pub fn new(grid: Grid, solution: Vec<Option<Move>>) -> Self {
        Self { grid, solution }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn solution(&self) -> &[Option<Move>] {
        &self.solution
    }

    /// Number of actual rolls in the solution.
    pub fn move_count(&self) -> usize {
        self.solution.iter().flatten().count()
    }

    pub fn origin(&self) -> Cell {
        origin_for(self.grid.rows(), self.grid.cols())
    }

    pub fn goal_cells(&self) -> Vec<Cell> {
        self.grid.cells_with(Marker::Goal)
    }

    pub fn score(&self) -> f64 {
        score(&self.grid, &self.solution)
    }

    /// Rolls a fresh block through the solution, returning the footprint
    /// before the first move and after each one.
    pub fn replay(&self) -> Result<Vec<Footprint>, BloxError> {
        let mut game = Game::with_size(self.grid.rows(), self.grid.cols());
        let mut frames = Vec::with_capacity(self.solution.len());
        frames.push(*game.footprint());
        for &direction in self.solution.iter().flatten() {
            game.roll(direction)?;
            frames.push(*game.footprint());
        }
        Ok(frames)
    }
}

/// Recorded moves (initial `None` included) per non-empty cell.
pub fn score(grid: &Grid, solution: &[Option<Move>]) -> f64 {
    let occupied = grid.occupied_count();
    if occupied == 0 {
        return 0.0;
    }
    solution.len() as f64 / occupied as f64
}

/// Formats a solution as `[-, Up, Left]`, `-` standing for the initial state.
pub fn format_solution(solution: &[Option<Move>]) -> String {
    let names: Vec<String> = solution
        .iter()
        .map(|mv| match mv {
            Some(direction) => format!("{direction:?}"),
            None => "-".to_string(),
        })
        .collect();
    format!("[{}]", names.join(", "))
}

/// Visual form of the board followed by the solution and the score.
pub fn format_level(level: &Level) -> String {
    let mut output = format_visual(level.grid());
    output.push_str(&format!("{}\n", format_solution(level.solution())));
    output.push_str(&format!("{:.4}\n", level.score()));
    output
}
