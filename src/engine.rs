//! Roll engine: legality gate and footprint transitions.
//!
//! Every (orientation, direction) pair is handled by one arm of an exhaustive
//! match, reading the extremal cells of the footprint *before* the move:
//!
//! | Direction | before -> after           | new cells                          |
//! |-----------|---------------------------|------------------------------------|
//! | Up        | Standing -> Vertical      | (h.r-1, h.c), (h.r-2, h.c)         |
//! | Up        | Vertical -> Standing      | (h.r-1, h.c)                       |
//! | Up        | Horizontal -> Horizontal  | (le.r-1, le.c), (ri.r-1, ri.c)     |
//! | Left      | Standing -> Horizontal    | (le.r, le.c-1), (le.r, le.c-2)     |
//! | Left      | Horizontal -> Standing    | (le.r, le.c-1)                     |
//! | Left      | Vertical -> Vertical      | (l.r, l.c-1), (h.r, h.c-1)         |
//!
//! Down and Right mirror Up and Left.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BloxError;
use crate::footprint::Footprint;
use crate::orientation::Orientation;

/// A roll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Checks the board margin before a roll.
///
/// The margin of two cells is sized for a lying block and is applied to every
/// orientation, so a standing block one row from the edge cannot roll off it
/// even though a single-cell step would fit.
pub fn is_legal(footprint: &Footprint, direction: Move, rows: usize, cols: usize) -> bool {
    let rows = rows as i32;
    let cols = cols as i32;
    match direction {
        Move::Up => footprint.highest().0 >= 2,
        Move::Down => footprint.lowest().0 < rows - 2,
        Move::Left => footprint.leftmost().1 >= 2,
        Move::Right => footprint.rightmost().1 < cols - 2,
    }
}

/// Computes the orientation and footprint after rolling in `direction`.
///
/// Returns `IllegalMove` without computing anything when the roll would
/// leave a `rows x cols` board.
pub fn roll(
    orientation: Orientation,
    footprint: &Footprint,
    direction: Move,
    rows: usize,
    cols: usize,
) -> Result<(Orientation, Footprint), BloxError> {
    if !is_legal(footprint, direction, rows, cols) {
        return Err(BloxError::IllegalMove { direction });
    }

    let h = footprint.highest();
    let l = footprint.lowest();
    let le = footprint.leftmost();
    let ri = footprint.rightmost();

    let next_orientation = match direction {
        Move::Up | Move::Down => orientation.roll_vertical(),
        Move::Left | Move::Right => orientation.roll_horizontal(),
    };

    let next_footprint = match (direction, orientation) {
        (Move::Up, Orientation::Standing) => Footprint::new(&[(h.0 - 1, h.1), (h.0 - 2, h.1)]),
        (Move::Up, Orientation::Vertical) => Footprint::new(&[(h.0 - 1, h.1)]),
        (Move::Up, Orientation::Horizontal) => {
            Footprint::new(&[(le.0 - 1, le.1), (ri.0 - 1, ri.1)])
        }
        (Move::Down, Orientation::Standing) => Footprint::new(&[(l.0 + 1, l.1), (l.0 + 2, l.1)]),
        (Move::Down, Orientation::Vertical) => Footprint::new(&[(l.0 + 1, l.1)]),
        (Move::Down, Orientation::Horizontal) => {
            Footprint::new(&[(le.0 + 1, le.1), (ri.0 + 1, ri.1)])
        }
        (Move::Left, Orientation::Standing) => {
            Footprint::new(&[(le.0, le.1 - 1), (le.0, le.1 - 2)])
        }
        (Move::Left, Orientation::Horizontal) => Footprint::new(&[(le.0, le.1 - 1)]),
        (Move::Left, Orientation::Vertical) => Footprint::new(&[(l.0, l.1 - 1), (h.0, h.1 - 1)]),
        (Move::Right, Orientation::Standing) => {
            Footprint::new(&[(ri.0, ri.1 + 1), (ri.0, ri.1 + 2)])
        }
        (Move::Right, Orientation::Horizontal) => Footprint::new(&[(ri.0, ri.1 + 1)]),
        (Move::Right, Orientation::Vertical) => {
            Footprint::new(&[(l.0, l.1 + 1), (h.0, h.1 + 1)])
        }
    }?;

    debug_assert_eq!(Orientation::of(&next_footprint), next_orientation);
    Ok((next_orientation, next_footprint))
}

/// Supplies the direction for each roll attempt.
///
/// Returning `None` means the source is exhausted and generation stops.
pub trait MoveSource {
    fn next_move(&mut self) -> Option<Move>;
}

/// Picks uniformly among the four directions, forever.
pub struct RandomMoves<R> {
    rng: R,
}

impl<R: Rng> RandomMoves<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMoves<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> MoveSource for RandomMoves<R> {
    fn next_move(&mut self) -> Option<Move> {
        Some(Move::ALL[self.rng.gen_range(0..Move::ALL.len())])
    }
}

/// Replays a fixed list of directions, then reports exhaustion.
pub struct ScriptedMoves {
    moves: std::vec::IntoIter<Move>,
}

impl ScriptedMoves {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self) -> Option<Move> {
        self.moves.next()
    }
}
