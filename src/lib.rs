//! # grid-duel
//!
//! Adversarial search core for two-player, zero-sum grid games.
//!
//! ## Design Principles
//!
//! 1. **Rules behind a trait**: the engines only see `RulesEngine`. The row
//!    game and the race game are two implementations.
//!
//! 2. **No hidden state**: every top-level call returns its own
//!    `SearchStats`. RNG and clock are injected, so a seeded engine on a
//!    `ManualClock` is fully reproducible.
//!
//! 3. **Degrade, don't fail**: no legal move is `None`; a spent time budget
//!    turns the remaining nodes into leaves. The search never errors.
//!
//! ## Modules
//!
//! - `core`: Board model, markers, moves, RNG, clock, configuration
//! - `rules`: `RulesEngine` trait and game results
//! - `games`: Row game and race game rules and evaluators
//! - `search`: Minimax and alpha-beta engines, statistics, decision trees

pub mod core;
pub mod games;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardError, Cell, Clock, ConfigError, Difficulty, ManualClock, Marker, Move, Preset,
    SearchConfig, SearchRng, SearchRngState, UndoInfo, WallClock,
};

pub use crate::rules::{GameResult, RulesEngine, Score, SCORE_INF};

pub use crate::games::{RaceGame, RowGame};

pub use crate::search::{
    AlphaBetaSearch, DecisionNode, MinimaxSearch, PruningEvent, SearchResult, SearchStats,
};
