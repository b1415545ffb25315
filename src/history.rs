//! Move history and cycle elimination.
//!
//! After every successful roll the game records a deep snapshot of the grid
//! and footprint together with the move that produced it. When the block comes
//! back to a footprint it already occupied, every move in between was a detour;
//! condensing drops them and hands back the grid as it was at the earlier visit.

use tracing::debug;

use crate::engine::Move;
use crate::footprint::Footprint;
use crate::grid::Grid;

/// Snapshot of the board taken right after a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    grid: Grid,
    footprint: Footprint,
}

impl HistoryEntry {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }
}

/// Recorded snapshots and the parallel move sequence.
///
/// `moves[i]` is the move that led to `entries[i]`; the first move is `None`
/// for the initial state.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    moves: Vec<Option<Move>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `mv` and an owned copy of the grid and footprint.
    pub fn record(&mut self, mv: Option<Move>, grid: &Grid, footprint: &Footprint) {
        self.moves.push(mv);
        self.entries.push(HistoryEntry {
            grid: grid.clone(),
            footprint: *footprint,
        });
    }

    /// Drops the detour since the most recent earlier visit of the current footprint.
    ///
    /// Scans from the second-to-last entry back to the first and stops at the
    /// first equal footprint `i`, keeping entries and moves `0..=i`. Returns the
    /// grid snapshot stored at `i`, or `None` when the footprint is new.
    pub fn condense(&mut self) -> Option<&Grid> {
        let (current, earlier) = self.entries.split_last()?;
        let revisit = earlier
            .iter()
            .rposition(|entry| entry.footprint == current.footprint)?;

        let dropped = self.entries.len() - (revisit + 1);
        self.entries.truncate(revisit + 1);
        self.moves.truncate(revisit + 1);
        debug!(revisit, dropped, "condensed history");

        Some(&self.entries[revisit].grid)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn moves(&self) -> &[Option<Move>] {
        &self.moves
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}
