//! Blox Level Generator Library
//!
//! Rolls a 1x1x2 block around a bounded board and turns random walks into
//! puzzle levels: a start cell, a goal footprint and a move sequence between
//! them. Detours are removed as they happen, whenever the block comes back to
//! a footprint it already occupied.
//!
//! Move selection is injected through [`engine::MoveSource`], so the same
//! generator runs on a seeded RNG, the OS RNG, or a fixed script.

pub mod config;
pub mod engine;
pub mod error;
pub mod footprint;
pub mod game;
pub mod generator;
pub mod grid;
pub mod history;
pub mod level;
pub mod orientation;
pub mod persistence;

pub use engine::{Move, MoveSource, RandomMoves, ScriptedMoves};
pub use error::BloxError;
pub use footprint::{Cell, Footprint};
pub use game::Game;
pub use level::Level;
pub use orientation::Orientation;
