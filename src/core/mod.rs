//! Core types: board model, injected RNG and clock, configuration.
//!
//! Everything here is game-agnostic. Game variants interpret the board
//! through `RulesEngine`; engines consume config, RNG and clock.

pub mod board;
pub mod clock;
pub mod config;
pub mod rng;

pub use board::{Board, BoardError, Cell, Marker, Move, UndoInfo};
pub use clock::{Clock, ManualClock, WallClock};
pub use config::{ConfigError, Difficulty, Preset, SearchConfig};
pub use rng::{SearchRng, SearchRngState};
