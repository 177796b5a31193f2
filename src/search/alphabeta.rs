//! Alpha-beta search with a wall-clock budget.
//!
//! Same values as plain minimax, fewer nodes. Root pieces are shuffled with
//! the engine's RNG before their moves are enumerated, so identical positions
//! don't always produce identical play or identical cutoffs.
//!
//! ## Time budget
//!
//! The injected `Clock` is polled at every node. Once the budget is spent,
//! nodes are scored statically as if they were leaves and the root stops
//! after the move it is on. A legal move is still returned.

use log::{debug, trace};

use crate::core::{Board, Clock, ConfigError, Marker, Move, SearchConfig, SearchRng, WallClock};
use crate::rules::{RulesEngine, Score, SCORE_INF};

use super::result::SearchResult;
use super::stats::{PruningEvent, SearchStats};

/// Alpha-beta search engine, generic over the game rules and the clock.
pub struct AlphaBetaSearch<R: RulesEngine, C: Clock = WallClock> {
    rules: R,
    config: SearchConfig,
    rng: SearchRng,
    clock: C,
}

impl<R: RulesEngine> AlphaBetaSearch<R, WallClock> {
    /// Create an engine on the wall clock. An unseeded config draws its seed from the OS.
    pub fn new(rules: R, config: SearchConfig) -> Self {
        let rng = config.seed.map_or_else(SearchRng::from_entropy, SearchRng::new);
        Self {
            rules,
            config,
            rng,
            clock: WallClock::default(),
        }
    }

    /// Create an engine after validating the config.
    pub fn try_new(rules: R, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(rules, config))
    }
}

impl<R: RulesEngine, C: Clock> AlphaBetaSearch<R, C> {
    /// Swap in a different clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> AlphaBetaSearch<R, C2> {
        AlphaBetaSearch {
            rules: self.rules,
            config: self.config,
            rng: self.rng,
            clock,
        }
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: SearchRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Best move for `own`, or `None` when it has no legal move.
    pub fn get_best_move(&mut self, board: &Board, own: Marker, opponent: Marker) -> Option<Move> {
        self.search(board, own, opponent).best_move
    }

    /// Full search returning the move, its value, and pruning statistics.
    pub fn search(&mut self, board: &Board, own: Marker, opponent: Marker) -> SearchResult {
        self.clock.restart();
        let mut stats = SearchStats::new();
        let mut scratch = board.clone();
        let rng_state = self.rng.state();

        let mut sources = self.rules.sources(&scratch, own);
        if sources.is_empty() {
            return SearchResult::no_move(stats, rng_state);
        }
        self.rng.shuffle(&mut sources);

        debug!(
            "alpha-beta search ({}): depth {}, {} root pieces",
            self.rules.name(),
            self.config.max_depth,
            sources.len()
        );

        let mut ctx = AlphaBeta {
            rules: &self.rules,
            clock: &self.clock,
            budget: self.config.time_budget(),
            ai: own,
            player: opponent,
            stats: &mut stats,
        };

        let mut best: Option<(Move, Score)> = None;
        let mut alpha = -SCORE_INF;
        let beta = SCORE_INF;
        let mut total_branches = 0usize;
        let mut pieces_with_moves = 0usize;

        'root: for source in sources {
            let destinations = ctx.rules.destinations(&scratch, source, own, opponent);
            total_branches += destinations.len();
            if !destinations.is_empty() {
                pieces_with_moves += 1;
            }

            for to in destinations {
                let mv = ctx.rules.make_move(source, to);
                let undo = scratch.apply(mv, own);
                let score = ctx.value(&mut scratch, self.config.max_depth, 0, false, alpha, beta);
                scratch.undo(mv, undo);

                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((mv, score));
                }
                alpha = alpha.max(score);

                if ctx.out_of_time() {
                    break 'root;
                }
            }
        }

        stats.branching_factor = total_branches as f64 / pieces_with_moves.max(1) as f64;
        stats.time_us = self.clock.elapsed().as_micros() as u64;

        debug!(
            "alpha-beta done: {} nodes, {} pruned, {}us{}, best {:?}",
            stats.total_nodes,
            stats.pruned_nodes,
            stats.time_us,
            if stats.timed_out { " (timed out)" } else { "" },
            best
        );

        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, score)| score),
            stats,
            rng_state,
        }
    }

    /// Sample search that only fills in statistics for display.
    ///
    /// Plays the first legal move found in row-major order, then searches
    /// the reply tree at a capped depth with a full window. The event log is
    /// cut to `max_pruning_events`.
    pub fn get_search_stats(&mut self, board: &Board, own: Marker, opponent: Marker) -> SearchStats {
        self.clock.restart();
        let mut stats = SearchStats::new();
        let mut scratch = board.clone();
        let depth = self.config.stats_sample_depth.min(self.config.max_depth);

        let first = self.rules.sources(&scratch, own).into_iter().find_map(|source| {
            self.rules
                .destinations(&scratch, source, own, opponent)
                .first()
                .map(|&to| self.rules.make_move(source, to))
        });

        if let Some(mv) = first {
            let mut ctx = AlphaBeta {
                rules: &self.rules,
                clock: &self.clock,
                budget: self.config.time_budget(),
                ai: own,
                player: opponent,
                stats: &mut stats,
            };
            scratch.apply(mv, own);
            ctx.value(&mut scratch, depth, 0, false, -SCORE_INF, SCORE_INF);
        }

        stats.time_us = self.clock.elapsed().as_micros() as u64;
        stats.truncate_events(self.config.max_pruning_events);
        stats
    }
}

/// Recursion state shared by every node of one search.
struct AlphaBeta<'a, R: RulesEngine, C: Clock> {
    rules: &'a R,
    clock: &'a C,
    budget: std::time::Duration,
    ai: Marker,
    player: Marker,
    stats: &'a mut SearchStats,
}

impl<R: RulesEngine, C: Clock> AlphaBeta<'_, R, C> {
    fn out_of_time(&mut self) -> bool {
        let expired = self.clock.elapsed() >= self.budget;
        if expired && !self.stats.timed_out {
            trace!("search budget of {:?} spent", self.budget);
        }
        self.stats.timed_out |= expired;
        expired
    }

    fn value(
        &mut self,
        board: &mut Board,
        remaining: u32,
        ply: u32,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.stats.record_node(ply);

        // A decided game outranks the horizon, so a win found at depth 0
        // still carries its ply adjustment
        if let Some(score) = self.rules.terminal_score(board, self.ai, self.player, ply) {
            return score;
        }
        if remaining == 0 {
            return self.rules.evaluate(board, self.ai, self.player);
        }
        if self.out_of_time() {
            return self.rules.evaluate(board, self.ai, self.player);
        }

        let (side, opponent) = if maximizing {
            (self.ai, self.player)
        } else {
            (self.player, self.ai)
        };

        let mut value = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut any_move = false;

        'node: for source in self.rules.sources(board, side) {
            for to in self.rules.destinations(board, source, side, opponent) {
                any_move = true;
                let mv = self.rules.make_move(source, to);
                let undo = board.apply(mv, side);
                let child = self.value(board, remaining - 1, ply + 1, !maximizing, alpha, beta);
                board.undo(mv, undo);

                if maximizing {
                    value = value.max(child);
                    alpha = alpha.max(value);
                } else {
                    value = value.min(child);
                    beta = beta.min(value);
                }

                if beta <= alpha {
                    self.stats.record_cutoff(PruningEvent {
                        depth: ply,
                        alpha,
                        beta,
                        is_maximizing: maximizing,
                        value,
                    });
                    break 'node;
                }
            }
        }

        if !any_move {
            return self.rules.evaluate(board, self.ai, self.player);
        }
        value
    }
}
