//! The game aggregate: one block, one board, one history.
//!
//! A `Game` is built fresh for every generated level. The block starts
//! standing on the origin, the centre cell of the board, and every successful
//! roll paints the cells it lands on as floor. The history is condensed after
//! each recorded roll so the final solution never contains a detour.

use tracing::{debug, trace};

use crate::config::BoardConfig;
use crate::engine::{self, Move, MoveSource};
use crate::error::BloxError;
use crate::footprint::{Cell, Footprint};
use crate::grid::{Grid, Marker};
use crate::history::History;
use crate::level::{self, Level};
use crate::orientation::Orientation;

/// Centre cell of a `rows x cols` board, where the block starts.
pub fn origin_for(rows: usize, cols: usize) -> Cell {
    ((rows / 2) as i32, (cols / 2) as i32)
}

#[derive(Debug, Clone)]
pub struct Game {
    orientation: Orientation,
    footprint: Footprint,
    grid: Grid,
    history: History,
    origin: Cell,
    standing_retry_limit: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A 20x20 game with the block standing at (10, 10).
    pub fn new() -> Self {
        Self::with_board(&BoardConfig::default())
    }

    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self::with_board(&BoardConfig {
            rows,
            cols,
            ..BoardConfig::default()
        })
    }

    /// Marks the origin as Start and records the initial state with no move.
    pub fn with_board(board: &BoardConfig) -> Self {
        let origin = origin_for(board.rows, board.cols);
        let mut grid = Grid::new(board.rows, board.cols);
        grid.set(origin, Marker::Start);

        let mut game = Self {
            orientation: Orientation::Standing,
            footprint: Footprint::standing(origin),
            grid,
            history: History::new(),
            origin,
            standing_retry_limit: board.standing_retry_limit,
        };
        game.record_move(None);
        game
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Moves recorded so far, starting with the `None` of the initial state.
    #[inline]
    pub fn solution(&self) -> &[Option<Move>] {
        self.history.moves()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// Rolls the block one step.
    ///
    /// An illegal roll returns `IllegalMove` and leaves orientation,
    /// footprint and grid untouched.
    pub fn roll(&mut self, direction: Move) -> Result<(), BloxError> {
        let (orientation, footprint) = engine::roll(
            self.orientation,
            &self.footprint,
            direction,
            self.grid.rows(),
            self.grid.cols(),
        )?;
        trace!(?direction, ?orientation, cells = ?footprint.cells(), "rolled");
        self.orientation = orientation;
        self.footprint = footprint;
        Ok(())
    }

    pub fn move_up(&mut self) -> bool {
        self.roll(Move::Up).is_ok()
    }

    pub fn move_down(&mut self) -> bool {
        self.roll(Move::Down).is_ok()
    }

    pub fn move_left(&mut self) -> bool {
        self.roll(Move::Left).is_ok()
    }

    pub fn move_right(&mut self) -> bool {
        self.roll(Move::Right).is_ok()
    }

    /// Appends `mv` with a snapshot of the current grid and footprint.
    pub fn record_move(&mut self, mv: Option<Move>) {
        self.history.record(mv, &self.grid, &self.footprint);
    }

    /// Drops the detour back to an earlier visit of the current footprint,
    /// restoring the grid as it was then.
    pub fn condense(&mut self) {
        if let Some(grid) = self.history.condense() {
            self.grid = grid.clone();
        }
    }

    /// Makes one roll attempt.
    ///
    /// A legal roll paints its cells as floor, is recorded, and the history is
    /// condensed. Returns whether the block moved.
    pub fn step(&mut self, direction: Move) -> Result<bool, BloxError> {
        match self.roll(direction) {
            Ok(()) => {
                self.paint_footprint(Marker::Floor);
                self.record_move(Some(direction));
                self.condense();
                Ok(true)
            }
            Err(BloxError::IllegalMove { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Explores the board with up to `max_attempts` rolls drawn from `moves`.
    ///
    /// Stops early if `moves` runs dry. With `require_standing`, single extra
    /// attempts follow until the block stands, at most `standing_retry_limit`
    /// of them; running out fails with `GenerationStalled`. Finally the origin
    /// is marked Start and the block's cells Goal.
    pub fn generate<S: MoveSource + ?Sized>(
        &mut self,
        moves: &mut S,
        max_attempts: usize,
        require_standing: bool,
    ) -> Result<(), BloxError> {
        for _ in 0..max_attempts {
            let Some(direction) = moves.next_move() else {
                break;
            };
            self.step(direction)?;
        }

        if require_standing {
            self.retry_until_standing(moves)?;
        }

        self.grid.set(self.origin, Marker::Start);
        self.paint_footprint(Marker::Goal);
        Ok(())
    }

    fn retry_until_standing<S: MoveSource + ?Sized>(
        &mut self,
        moves: &mut S,
    ) -> Result<(), BloxError> {
        let mut attempts = 0;
        while self.orientation != Orientation::Standing {
            if attempts == self.standing_retry_limit {
                debug!(attempts, "block never stood up");
                return Err(BloxError::GenerationStalled { attempts });
            }
            let direction = moves
                .next_move()
                .ok_or(BloxError::GenerationStalled { attempts })?;
            attempts += 1;
            self.step(direction)?;
        }
        Ok(())
    }

    fn paint_footprint(&mut self, marker: Marker) {
        for &cell in self.footprint.cells() {
            self.grid.set(cell, marker);
        }
    }

    /// Recorded moves per non-empty cell.
    pub fn score(&self) -> f64 {
        level::score(&self.grid, self.solution())
    }

    /// Snapshot of the board and solution as a finished level.
    pub fn to_level(&self) -> Level {
        Level::new(self.grid.clone(), self.solution().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedMoves;
    use Move::*;

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.grid().rows(), 20);
        assert_eq!(game.grid().cols(), 20);
        assert_eq!(game.origin(), (10, 10));
        assert_eq!(game.orientation(), Orientation::Standing);
        assert_eq!(game.footprint().cells(), &[(10, 10)]);
        assert_eq!(game.grid().get((10, 10)), Marker::Start);
        assert_eq!(game.grid().occupied_count(), 1);
        assert_eq!(game.solution(), &[None]);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_scripted_trace() {
        let expected: [(Move, Orientation, &[Cell]); 5] = [
            (Up, Orientation::Vertical, &[(8, 10), (9, 10)]),
            (Up, Orientation::Standing, &[(7, 10)]),
            (Right, Orientation::Horizontal, &[(7, 11), (7, 12)]),
            (Right, Orientation::Standing, &[(7, 13)]),
            (Down, Orientation::Vertical, &[(8, 13), (9, 13)]),
        ];

        let mut game = Game::new();
        for (step, (direction, orientation, cells)) in expected.into_iter().enumerate() {
            assert_eq!(game.step(direction), Ok(true), "step {step}");
            assert_eq!(game.orientation(), orientation, "step {step}");
            assert_eq!(game.footprint().cells(), cells, "step {step}");
        }
        assert_eq!(
            game.solution(),
            &[None, Some(Up), Some(Up), Some(Right), Some(Right), Some(Down)]
        );
    }

    #[test]
    fn test_two_ups_stand_the_block_up_again() {
        let mut game = Game::new();
        assert!(game.move_up());
        assert!(game.move_up());
        assert_eq!(game.orientation(), Orientation::Standing);
        // lying over rows 8-9 then tipping onto row 7
        assert_eq!(game.footprint().highest(), (7, 10));
    }

    #[test]
    fn test_up_blocked_at_row_1() {
        let mut game = Game::with_size(3, 20);
        assert_eq!(game.footprint().cells(), &[(1, 10)]);
        let before = game.clone();

        assert!(!game.move_up());
        assert_eq!(game.orientation(), before.orientation());
        assert_eq!(game.footprint(), before.footprint());
        assert_eq!(game.grid(), before.grid());
        assert_eq!(game.step(Up), Ok(false));
        assert_eq!(game.solution(), &[None]);
    }

    #[test]
    fn test_up_allowed_at_row_2() {
        let mut game = Game::with_size(5, 20);
        assert_eq!(game.footprint().cells(), &[(2, 10)]);
        assert!(game.move_up());
        assert_eq!(game.footprint().cells(), &[(0, 10), (1, 10)]);
    }

    #[test]
    fn test_illegal_roll_reports_direction() {
        let mut game = Game::with_size(3, 3);
        assert_eq!(
            game.roll(Left),
            Err(BloxError::IllegalMove { direction: Left })
        );
    }

    #[test]
    fn test_manual_record_and_condense() {
        let mut game = Game::new();
        let before_len = game.history().len();
        let before_grid = game.grid().clone();

        assert!(game.move_up());
        game.record_move(Some(Up));
        assert!(game.move_down());
        game.record_move(Some(Down));
        assert_eq!(game.history().len(), before_len + 2);

        game.condense();
        assert_eq!(game.history().len(), before_len);
        assert_eq!(game.grid(), &before_grid);
        assert_eq!(game.footprint().cells(), &[(10, 10)]);
    }

    #[test]
    fn test_step_condenses_detour_and_restores_grid() {
        let mut game = Game::new();
        let before = game.grid().clone();

        assert_eq!(game.step(Up), Ok(true));
        assert_eq!(game.grid().get((8, 10)), Marker::Floor);
        assert_eq!(game.step(Down), Ok(true));

        assert_eq!(game.history().len(), 1);
        assert_eq!(game.solution(), &[None]);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn test_score_grows_with_recorded_moves() {
        let mut game = Game::new();
        let first = game.score();
        game.record_move(None);
        assert!(game.score() > first);
        assert_eq!(game.score(), 2.0);
    }

    #[test]
    fn test_generate_scripted_level() {
        let mut game = Game::with_size(8, 8);
        let mut moves = ScriptedMoves::new([Up, Right, Down, Left, Right]);
        game.generate(&mut moves, 5, true).unwrap();

        assert_eq!(game.solution(), &[None, Some(Up), Some(Right), Some(Down)]);
        assert_eq!(game.grid().get((4, 4)), Marker::Start);
        assert_eq!(game.grid().get((4, 5)), Marker::Goal);
        // the Left/Right detour painted (4, 3); condensing undid it
        assert_eq!(game.grid().get((4, 3)), Marker::Empty);
        assert_eq!(
            game.grid().cells_with(Marker::Floor),
            vec![(2, 4), (2, 5), (3, 4), (3, 5)]
        );
        assert!((game.score() - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_generate_stops_when_moves_run_out() {
        let mut game = Game::new();
        game.generate(&mut ScriptedMoves::new([Left]), 10, false).unwrap();
        assert_eq!(game.solution(), &[None, Some(Left)]);
        assert_eq!(game.grid().cells_with(Marker::Goal), vec![(10, 8), (10, 9)]);
    }

    #[test]
    fn test_require_standing_with_exhausted_source_stalls() {
        let mut game = Game::new();
        let result = game.generate(&mut ScriptedMoves::new([Up]), 1, true);
        assert_eq!(result, Err(BloxError::GenerationStalled { attempts: 0 }));
    }

    #[test]
    fn test_require_standing_respects_retry_limit() {
        let board = BoardConfig {
            standing_retry_limit: 1,
            ..BoardConfig::default()
        };
        let mut game = Game::with_board(&board);
        // Left keeps a vertical block vertical
        let result = game.generate(&mut ScriptedMoves::new([Up, Left, Up]), 1, true);
        assert_eq!(result, Err(BloxError::GenerationStalled { attempts: 1 }));
    }

    #[test]
    fn test_require_standing_takes_extra_attempts() {
        let mut game = Game::new();
        game.generate(&mut ScriptedMoves::new([Up, Left, Up]), 1, true).unwrap();
        assert_eq!(game.orientation(), Orientation::Standing);
        assert_eq!(game.solution(), &[None, Some(Up), Some(Left), Some(Up)]);
        assert_eq!(game.grid().cells_with(Marker::Goal), vec![(7, 9)]);
    }

    #[test]
    fn test_random_generation_invariants() {
        for seed in 0..50 {
            let mut game = Game::new();
            let mut moves = crate::engine::RandomMoves::seeded(seed);
            game.generate(&mut moves, 40, true).unwrap();

            assert_eq!(game.orientation(), Orientation::Standing);
            assert_eq!(game.grid().cells_with(Marker::Goal), game.footprint().cells());

            let footprints: Vec<_> = game
                .history()
                .entries()
                .iter()
                .map(|entry| *entry.footprint())
                .collect();
            for (i, a) in footprints.iter().enumerate() {
                assert!(
                    footprints[i + 1..].iter().all(|b| b != a),
                    "seed {seed}: footprint {a:?} recorded twice"
                );
            }
            assert_eq!(game.history().len(), game.solution().len());
        }
    }
}
