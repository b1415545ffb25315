//! Batch generation: many independent games, filtered by score.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::config::{BoardConfig, GeneratorConfig};
use crate::engine::MoveSource;
use crate::error::BloxError;
use crate::game::Game;
use crate::grid::Grid;
use crate::level::Level;

/// Kept levels and why the others were dropped.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub levels: Vec<Level>,
    pub attempted: usize,
    /// Games that never ended standing within the retry bound.
    pub stalled: usize,
    /// Games whose walk condensed back to the start.
    pub trivial: usize,
    pub below_threshold: usize,
    pub duplicates: usize,
}

/// Runs `settings.levels` fresh games and keeps the distinct ones scoring at
/// least `settings.min_score`.
///
/// A stalled game is discarded and the batch continues; any other error ends it.
pub fn generate_levels<S: MoveSource + ?Sized>(
    board: &BoardConfig,
    settings: &GeneratorConfig,
    moves: &mut S,
) -> Result<GenerationReport, BloxError> {
    let mut report = GenerationReport::default();
    let mut seen_grids: FxHashSet<Grid> = FxHashSet::default();

    for index in 0..settings.levels {
        report.attempted += 1;

        let mut game = Game::with_board(board);
        match game.generate(&mut *moves, settings.moves, settings.require_standing) {
            Ok(()) => {}
            Err(BloxError::GenerationStalled { attempts }) => {
                debug!(index, attempts, "discarding stalled game");
                report.stalled += 1;
                continue;
            }
            Err(err) => return Err(err),
        }

        let level = game.to_level();
        if level.move_count() == 0 {
            report.trivial += 1;
            continue;
        }

        let score = level.score();
        if score < settings.min_score {
            report.below_threshold += 1;
            continue;
        }

        // same board means same start and goal, so the same puzzle
        if !seen_grids.insert(level.grid().clone()) {
            report.duplicates += 1;
            continue;
        }

        debug!(index, score, moves = level.move_count(), "kept level");
        report.levels.push(level);
    }

    info!(
        kept = report.levels.len(),
        attempted = report.attempted,
        stalled = report.stalled,
        trivial = report.trivial,
        below_threshold = report.below_threshold,
        duplicates = report.duplicates,
        "generation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Move, RandomMoves, ScriptedMoves};

    fn settings(levels: usize, min_score: f64) -> GeneratorConfig {
        GeneratorConfig {
            levels,
            min_score,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_kept_levels_meet_threshold() {
        let settings = settings(40, 0.3);
        let report = generate_levels(
            &BoardConfig::default(),
            &settings,
            &mut RandomMoves::seeded(11),
        )
        .unwrap();

        assert_eq!(report.attempted, 40);
        assert_eq!(
            report.levels.len()
                + report.stalled
                + report.trivial
                + report.below_threshold
                + report.duplicates,
            40
        );
        for level in &report.levels {
            assert!(level.score() >= 0.3);
            assert!(level.move_count() > 0);
        }
    }

    #[test]
    fn test_default_threshold_rejects_sprawling_levels() {
        // the lying block rolls sideways twice: 8 cells for 4 moves, 5/8 < 0.7
        let settings = GeneratorConfig {
            levels: 1,
            moves: 4,
            ..GeneratorConfig::default()
        };
        let report = generate_levels(
            &BoardConfig::default(),
            &settings,
            &mut ScriptedMoves::new([Move::Up, Move::Right, Move::Right, Move::Down]),
        )
        .unwrap();

        assert_eq!(report.below_threshold, 1);
        assert!(report.levels.is_empty());
    }

    #[test]
    fn test_default_threshold_filters_random_games() {
        let board = BoardConfig::default();
        let settings = GeneratorConfig::default();
        let mut below_threshold = 0;
        for seed in 0..3 {
            let report =
                generate_levels(&board, &settings, &mut RandomMoves::seeded(seed)).unwrap();
            below_threshold += report.below_threshold;
            for level in &report.levels {
                assert!(level.score() >= settings.min_score, "seed {seed}");
            }
        }
        assert!(below_threshold > 0);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        // the same two-roll walk three times over
        let script = [Move::Up, Move::Up].repeat(3);
        let settings = GeneratorConfig {
            levels: 3,
            moves: 2,
            min_score: 0.0,
            ..GeneratorConfig::default()
        };
        let report = generate_levels(
            &BoardConfig::default(),
            &settings,
            &mut ScriptedMoves::new(script),
        )
        .unwrap();

        assert_eq!(report.levels.len(), 1);
        assert_eq!(report.duplicates, 2);
    }

    #[test]
    fn test_stalled_games_are_counted() {
        let settings = GeneratorConfig {
            levels: 1,
            moves: 1,
            min_score: 0.0,
            ..GeneratorConfig::default()
        };
        // a lone Up leaves the block lying and the source empty
        let report = generate_levels(
            &BoardConfig::default(),
            &settings,
            &mut ScriptedMoves::new([Move::Up]),
        )
        .unwrap();

        assert_eq!(report.stalled, 1);
        assert!(report.levels.is_empty());
    }

    #[test]
    fn test_walk_back_to_start_is_trivial() {
        let settings = GeneratorConfig {
            levels: 1,
            moves: 2,
            min_score: 0.0,
            ..GeneratorConfig::default()
        };
        let report = generate_levels(
            &BoardConfig::default(),
            &settings,
            &mut ScriptedMoves::new([Move::Up, Move::Down]),
        )
        .unwrap();

        assert_eq!(report.trivial, 1);
        assert!(report.levels.is_empty());
    }
}
