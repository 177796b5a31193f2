//! Search instrumentation for visualization and tuning.
//!
//! A fresh `SearchStats` is created for every top-level search and handed
//! back to the caller. Nothing in here feeds back into move selection.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::rules::Score;

/// One alpha-beta cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningEvent {
    /// Ply of the node that cut off (root children are ply 0).
    pub depth: u32,
    pub alpha: Score,
    pub beta: Score,
    pub is_maximizing: bool,
    /// Node value when the cutoff happened.
    pub value: Score,
}

/// Statistics collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Recursive calls made.
    pub total_nodes: u64,

    /// Cutoffs taken (one per node that stopped early).
    pub pruned_nodes: u64,

    /// Cutoff log, in the order they happened.
    pub pruning_events: Vec<PruningEvent>,

    /// Total time spent searching (microseconds).
    pub time_us: u64,

    /// Deepest ply visited.
    pub max_depth_reached: u32,

    /// Root destinations per root piece that had any.
    pub branching_factor: f64,

    /// Whether any node was cut short by the time budget.
    pub timed_out: bool,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a visited node at `ply`.
    #[inline]
    pub fn record_node(&mut self, ply: u32) {
        self.total_nodes += 1;
        self.max_depth_reached = self.max_depth_reached.max(ply);
    }

    /// Count a cutoff and log it.
    pub fn record_cutoff(&mut self, event: PruningEvent) {
        self.pruned_nodes += 1;
        self.pruning_events.push(event);
    }

    /// Keep only the first `max` pruning events.
    pub fn truncate_events(&mut self, max: usize) {
        self.pruning_events.truncate(max);
    }

    /// Fraction of visited nodes that ended in a cutoff.
    #[must_use]
    pub fn pruning_ratio(&self) -> f64 {
        if self.total_nodes == 0 {
            0.0
        } else {
            self.pruned_nodes as f64 / self.total_nodes as f64
        }
    }

    /// Calculate nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.total_nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Logged cutoffs per ply.
    #[must_use]
    pub fn cutoffs_by_depth(&self) -> FxHashMap<u32, usize> {
        let mut histogram = FxHashMap::default();
        for event in &self.pruning_events {
            *histogram.entry(event.depth).or_insert(0) += 1;
        }
        histogram
    }
}
