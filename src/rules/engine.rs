//! Rules engine trait for game variants.
//!
//! Variants implement `RulesEngine` to define:
//! - Where a side may move from, and where to
//! - When the game is decided and what that is worth
//! - The static evaluation used at leaves
//!
//! The search engines call into `RulesEngine` but never interpret
//! variant-specific concepts directly.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Board, Cell, Marker, Move};

/// Utility of a position from the searching side's point of view.
pub type Score = i32;

/// Bound used as +infinity in alpha-beta windows. `-SCORE_INF` is safe to negate.
pub const SCORE_INF: Score = i32::MAX;

/// Move origins for one side. Placement games use a single `None`.
pub type Sources = SmallVec<[Option<Cell>; 16]>;

/// Destinations from one origin.
pub type Destinations = SmallVec<[Cell; 16]>;

/// Result of a decided game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Marker),
    /// Nobody can win any more.
    Draw,
}

impl GameResult {
    /// Check if a marker won.
    #[must_use]
    pub fn is_winner(&self, marker: Marker) -> bool {
        match self {
            GameResult::Winner(m) => m.owner() == marker.owner(),
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `sources` / `destinations`: return empty when the side can't act
/// - `terminal_score`: `None` if the game continues
/// - `evaluate`: positive favours `ai`
pub trait RulesEngine {
    /// Short variant name for logs.
    fn name(&self) -> &'static str;

    /// Origins `side` may move from, in a stable order.
    fn sources(&self, board: &Board, side: Marker) -> Sources;

    /// Legal destinations from `source` for `side` against `opponent`.
    fn destinations(
        &self,
        board: &Board,
        source: Option<Cell>,
        side: Marker,
        opponent: Marker,
    ) -> Destinations;

    /// Value of a decided position reached `ply` plies below the root.
    fn terminal_score(&self, board: &Board, ai: Marker, player: Marker, ply: u32) -> Option<Score>;

    /// Static heuristic value of `board` for `ai`.
    fn evaluate(&self, board: &Board, ai: Marker, player: Marker) -> Score;

    // === Convenience Methods ===

    /// Build the move for a source/destination pair.
    fn make_move(&self, source: Option<Cell>, to: Cell) -> Move {
        Move { from: source, to }
    }

    /// Enumerate all legal moves for `side`.
    fn legal_moves(&self, board: &Board, side: Marker, opponent: Marker) -> Vec<Move> {
        let mut moves = Vec::new();
        for source in self.sources(board, side) {
            for to in self.destinations(board, source, side, opponent) {
                moves.push(self.make_move(source, to));
            }
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(Marker::AI);
        assert!(result.is_winner(Marker::AI));
        assert!(result.is_winner(Marker::AI.shielded()));
        assert!(!result.is_winner(Marker::PLAYER));

        assert!(!GameResult::Draw.is_winner(Marker::AI));
    }

    #[test]
    fn test_score_inf_negates() {
        assert_eq!(-(-SCORE_INF), SCORE_INF);
        assert!(-SCORE_INF < -1000);
    }
}
