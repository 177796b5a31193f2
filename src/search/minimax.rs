//! Exhaustive fixed-depth minimax, no pruning.
//!
//! Used where the whole tree matters: the row game's move choice and the
//! decision tree rendered for teaching. Every node is visited, so counts
//! are comparable across positions.
//!
//! ## Tie-breaking
//!
//! When two root moves score exactly the same, the later one replaces the
//! incumbent on a fair coin flip from the engine's RNG. This is deliberate
//! variety in play; seed the config to make it reproducible.

use log::debug;

use crate::core::{Board, Clock, ConfigError, Marker, Move, SearchConfig, SearchRng, WallClock};
use crate::rules::{RulesEngine, Score, SCORE_INF};

use super::result::SearchResult;
use super::stats::SearchStats;
use super::tree::{DecisionNode, TREE_REPLY_LIMIT};

/// Minimax search engine, generic over the game rules and the clock.
///
/// The clock only times the search; minimax has no budget.
pub struct MinimaxSearch<R: RulesEngine, C: Clock = WallClock> {
    rules: R,
    config: SearchConfig,
    rng: SearchRng,
    clock: C,
}

impl<R: RulesEngine> MinimaxSearch<R, WallClock> {
    /// Create an engine. An unseeded config draws its seed from the OS.
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

impl<R: RulesEngine, C: Clock> MinimaxSearch<R, C> {
    /// Swap in a different clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> MinimaxSearch<R, C2> {
        MinimaxSearch {
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

    /// Full search returning the move, its value, and node counts.
    pub fn search(&mut self, board: &Board, own: Marker, opponent: Marker) -> SearchResult {
        self.clock.restart();
        let mut stats = SearchStats::new();
        let rng_state = self.rng.state();

        let moves = self.rules.legal_moves(board, own, opponent);
        match moves.as_slice() {
            [] => return SearchResult::no_move(stats, rng_state),
            [only] => {
                return SearchResult {
                    best_move: Some(*only),
                    score: None,
                    stats,
                    rng_state,
                }
            }
            _ => {}
        }

        debug!(
            "minimax search ({}): depth {}, {} root moves",
            self.rules.name(),
            self.config.max_depth,
            moves.len()
        );

        let scored = self.score_root(board, &moves, own, opponent, &mut stats);

        let mut best: Option<(Move, Score)> = None;
        for (mv, score) in scored {
            best = match best {
                Some((_, best_score)) if score > best_score => Some((mv, score)),
                Some((_, best_score)) if score == best_score && self.rng.gen_bool(0.5) => Some((mv, score)),
                None => Some((mv, score)),
                keep => keep,
            };
        }

        stats.time_us = self.clock.elapsed().as_micros() as u64;
        debug!(
            "minimax done: {} nodes in {}us, best {:?}",
            stats.total_nodes,
            stats.time_us,
            best
        );

        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, score)| score),
            stats,
            rng_state,
        }
    }

    /// Exact minimax value of every root move, in generation order.
    pub fn score_moves(&self, board: &Board, own: Marker, opponent: Marker) -> Vec<(Move, Score)> {
        let moves = self.rules.legal_moves(board, own, opponent);
        let mut stats = SearchStats::new();
        self.score_root(board, &moves, own, opponent, &mut stats)
    }

    /// Root, every ai move, and up to `TREE_REPLY_LIMIT` replies per move.
    pub fn decision_tree(&self, board: &Board, own: Marker, opponent: Marker) -> DecisionNode {
        let rules = &self.rules;
        let mut root = DecisionNode::leaf(board.clone(), None, 0, true);

        for mv in rules.legal_moves(board, own, opponent) {
            let mut child_board = board.clone();
            child_board.apply(mv, own);

            let replies: Vec<DecisionNode> = rules
                .legal_moves(&child_board, opponent, own)
                .into_iter()
                .take(TREE_REPLY_LIMIT)
                .map(|reply| {
                    let mut reply_board = child_board.clone();
                    reply_board.apply(reply, opponent);
                    let score = rules.evaluate(&reply_board, own, opponent);
                    DecisionNode::leaf(reply_board, Some(reply), score, true)
                })
                .collect();

            let score = replies
                .iter()
                .map(|r| r.score)
                .min()
                .unwrap_or_else(|| rules.evaluate(&child_board, own, opponent));

            let mut child = DecisionNode::leaf(child_board, Some(mv), score, false);
            child.children = replies;
            root.children.push(child);
        }

        root.score = root
            .children
            .iter()
            .map(|c| c.score)
            .max()
            .unwrap_or_else(|| rules.evaluate(board, own, opponent));
        root
    }

    fn score_root(
        &self,
        board: &Board,
        moves: &[Move],
        own: Marker,
        opponent: Marker,
        stats: &mut SearchStats,
    ) -> Vec<(Move, Score)> {
        let mut scratch = board.clone();
        let mut minimax = Minimax {
            rules: &self.rules,
            ai: own,
            player: opponent,
            stats,
        };

        moves
            .iter()
            .map(|&mv| {
                let undo = scratch.apply(mv, own);
                let score = minimax.value(&mut scratch, self.config.max_depth, 0, false);
                scratch.undo(mv, undo);
                (mv, score)
            })
            .collect()
    }
}

/// Recursion state shared by every node of one search.
struct Minimax<'a, R: RulesEngine> {
    rules: &'a R,
    ai: Marker,
    player: Marker,
    stats: &'a mut SearchStats,
}

impl<R: RulesEngine> Minimax<'_, R> {
    fn value(&mut self, board: &mut Board, remaining: u32, ply: u32, maximizing: bool) -> Score {
        self.stats.record_node(ply);

        if let Some(score) = self.rules.terminal_score(board, self.ai, self.player, ply) {
            return score;
        }
        if remaining == 0 {
            return self.rules.evaluate(board, self.ai, self.player);
        }

        let (side, opponent) = if maximizing {
            (self.ai, self.player)
        } else {
            (self.player, self.ai)
        };
        let moves = self.rules.legal_moves(board, side, opponent);
        if moves.is_empty() {
            return self.rules.evaluate(board, self.ai, self.player);
        }

        let mut best = if maximizing { -SCORE_INF } else { SCORE_INF };
        for mv in moves {
            let undo = board.apply(mv, side);
            let score = self.value(board, remaining - 1, ply + 1, !maximizing);
            board.undo(mv, undo);

            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, ManualClock};
    use crate::games::RowGame;
    use std::time::Duration;

    fn engine(depth: u32) -> MinimaxSearch<RowGame> {
        MinimaxSearch::new(RowGame, SearchConfig::default().with_max_depth(depth).with_seed(42))
    }

    #[test]
    fn test_no_moves_returns_none() {
        let board = Board::from_rows(&[
            vec![Some(1), Some(2), Some(1)],
            vec![Some(1), Some(2), Some(2)],
            vec![Some(2), Some(1), Some(1)],
        ])
        .unwrap();

        let result = engine(3).search(&board, Marker::AI, Marker::PLAYER);
        assert_eq!(result.best_move, None);
        assert_eq!(result.stats.total_nodes, 0);
    }

    #[test]
    fn test_single_move_skips_search() {
        let board = Board::from_rows(&[
            vec![Some(1), Some(2), Some(1)],
            vec![Some(1), Some(2), Some(2)],
            vec![Some(2), Some(1), None],
        ])
        .unwrap();

        let result = engine(3).search(&board, Marker::AI, Marker::PLAYER);
        assert_eq!(result.best_move, Some(Move::place(Cell::new(2, 2))));
        assert_eq!(result.score, None);
        assert_eq!(result.stats.total_nodes, 0);
    }

    #[test]
    fn test_visits_every_node_at_depth_one() {
        // 9 root moves, each followed by 8 replies evaluated as leaves
        let result = engine(1).search(&Board::new(3), Marker::AI, Marker::PLAYER);
        assert_eq!(result.stats.total_nodes, 9 + 9 * 8);
        assert_eq!(result.stats.max_depth_reached, 1);
        assert_eq!(result.stats.pruned_nodes, 0);
    }

    #[test]
    fn test_time_comes_from_injected_clock() {
        let mut search = engine(1).with_clock(ManualClock::frozen_at(Duration::from_micros(250)));
        let result = search.search(&Board::new(3), Marker::AI, Marker::PLAYER);
        assert_eq!(result.stats.time_us, 250);
    }

    #[test]
    fn test_rng_state_replays_tie_break() {
        // Row 0 and column 0 both complete; the coin flip picks between them
        let board = Board::from_rows(&[
            vec![Some(2), Some(2), None],
            vec![Some(2), None, None],
            vec![None, None, Some(1)],
        ])
        .unwrap();
        let mut search = engine(1);
        for _ in 0..3 {
            search.search(&board, Marker::AI, Marker::PLAYER);
        }

        let result = search.search(&board, Marker::AI, Marker::PLAYER);
        assert_ne!(result.rng_state, SearchRng::new(42).state());

        let mut replay = MinimaxSearch::new(RowGame, SearchConfig::default().with_max_depth(1))
            .with_rng(SearchRng::from_state(&result.rng_state));
        let again = replay.search(&board, Marker::AI, Marker::PLAYER);
        assert_eq!(again.best_move, result.best_move);
        assert_eq!(again.score, Some(10));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = Board::from_rows(&[
            vec![Some(1), None, None],
            vec![None, Some(2), None],
            vec![None, None, None],
        ])
        .unwrap();
        let copy = board.clone();

        let _ = engine(4).search(&board, Marker::AI, Marker::PLAYER);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_score_moves_matches_search_score() {
        let board = Board::from_rows(&[
            vec![Some(1), None, None],
            vec![Some(1), Some(2), None],
            vec![None, None, None],
        ])
        .unwrap();
        let mut search = engine(3);

        let scored = search.score_moves(&board, Marker::AI, Marker::PLAYER);
        let max = scored.iter().map(|(_, s)| *s).max().unwrap();
        let result = search.search(&board, Marker::AI, Marker::PLAYER);

        assert_eq!(result.score, Some(max));
        assert!(scored.contains(&(result.best_move.unwrap(), max)));
    }

    #[test]
    fn test_decision_tree_shape() {
        let search = engine(2);
        let tree = search.decision_tree(&Board::new(3), Marker::AI, Marker::PLAYER);

        assert!(tree.is_maximizing);
        assert_eq!(tree.children.len(), 9);
        for child in &tree.children {
            assert!(!child.is_maximizing);
            assert_eq!(child.children.len(), TREE_REPLY_LIMIT);
            let min = child.children.iter().map(|c| c.score).min().unwrap();
            assert_eq!(child.score, min);
        }
        let max = tree.children.iter().map(|c| c.score).max().unwrap();
        assert_eq!(tree.score, max);
        assert_eq!(tree.node_count(), 1 + 9 + 9 * TREE_REPLY_LIMIT);
    }

    #[test]
    fn test_decision_tree_without_replies() {
        let board = Board::from_rows(&[
            vec![Some(1), Some(2), Some(1)],
            vec![Some(1), Some(2), Some(2)],
            vec![Some(2), Some(1), None],
        ])
        .unwrap();
        let tree = engine(2).decision_tree(&board, Marker::AI, Marker::PLAYER);

        assert_eq!(tree.children.len(), 1);
        let only = &tree.children[0];
        assert!(only.children.is_empty());
        assert_eq!(only.score, RowGame.evaluate(&only.board, Marker::AI, Marker::PLAYER));
    }
}
