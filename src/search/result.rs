//! Outcome of a top-level search call.

use serde::{Deserialize, Serialize};

use crate::core::{Move, SearchRngState};
use crate::rules::Score;

use super::stats::SearchStats;

/// Chosen move plus the instrumentation gathered while choosing it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,

    /// Search value of `best_move`. `None` when no tree was searched
    /// (no moves, or a forced single move).
    pub score: Option<Score>,

    /// Counters for this call only.
    pub stats: SearchStats,

    /// Engine RNG state before this call. Restoring it with
    /// `SearchRng::from_state` and searching the same board replays the
    /// same choice.
    pub rng_state: SearchRngState,
}

impl SearchResult {
    pub(crate) fn no_move(stats: SearchStats, rng_state: SearchRngState) -> Self {
        Self {
            best_move: None,
            score: None,
            stats,
            rng_state,
        }
    }
}
