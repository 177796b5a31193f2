//! Race game rules and evaluator.

use crate::core::{Board, Cell, Marker};
use crate::rules::{Destinations, GameResult, RulesEngine, Score, Sources};

/// Value of a piece reaching its goal row.
pub const GOAL_SCORE: Score = 1000;

/// Weight of each piece of material difference.
pub const MATERIAL_WEIGHT: Score = 10;

const PLAYER_DIRECTIONS: [(isize, isize); 3] = [(-1, 0), (-1, -1), (-1, 1)];
const AI_DIRECTIONS: [(isize, isize); 3] = [(1, 0), (1, -1), (1, 1)];
const ALL_DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// The race/capture game: reach the far row first.
#[derive(Clone, Copy, Debug, Default)]
pub struct RaceGame;

impl RaceGame {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Step directions for a piece identity. Unknown identities get none.
    #[must_use]
    pub fn directions(piece: Marker) -> &'static [(isize, isize)] {
        if piece.is_shielded() {
            &ALL_DIRECTIONS
        } else if piece == Marker::PLAYER {
            &PLAYER_DIRECTIONS
        } else if piece == Marker::AI {
            &AI_DIRECTIONS
        } else {
            &[]
        }
    }

    /// Legal destinations for `piece` standing on `source`.
    ///
    /// Empty cells are always legal; a diagonal step may also land on a cell
    /// holding exactly `opponent` (a capture). Shielded opponents can't be taken.
    #[must_use]
    pub fn generate_moves(
        &self,
        board: &Board,
        source: Cell,
        piece: Marker,
        opponent: Marker,
    ) -> Destinations {
        let size = board.size();
        Self::directions(piece)
            .iter()
            .filter_map(|&(d_row, d_col)| {
                let to = source.offset(d_row, d_col, size)?;
                let diagonal = d_row.abs() == 1 && d_col.abs() == 1;
                match board.get(to) {
                    None => Some(to),
                    Some(m) if diagonal && m == opponent => Some(to),
                    Some(_) => None,
                }
            })
            .collect()
    }

    /// Starting position: two home rows per side in a checkerboard pattern.
    ///
    /// The ai holds rows 0-1, the player the last two rows.
    #[must_use]
    pub fn initial_board(size: usize) -> Board {
        let mut board = Board::new(size);
        for row in 0..size {
            let owner = if row < 2 {
                Marker::AI
            } else if row + 2 >= size {
                Marker::PLAYER
            } else {
                continue;
            };
            for col in (0..size).filter(|col| (row + col) % 2 == 0) {
                board.set(Cell::new(row, col), Some(owner));
            }
        }
        board
    }

    /// Side whose piece reached its goal row, or whose opponent has no pieces.
    #[must_use]
    pub fn winner(&self, board: &Board) -> Option<Marker> {
        let last = board.size().checked_sub(1)?;
        for col in 0..board.size() {
            if board.get(Cell::new(last, col)).map(Marker::owner) == Some(Marker::AI) {
                return Some(Marker::AI);
            }
            if board.get(Cell::new(0, col)).map(Marker::owner) == Some(Marker::PLAYER) {
                return Some(Marker::PLAYER);
            }
        }

        let ai = board.pieces_of(Marker::AI).count();
        let player = board.pieces_of(Marker::PLAYER).count();
        match (ai, player) {
            (0, 0) => None,
            (0, _) => Some(Marker::PLAYER),
            (_, 0) => Some(Marker::AI),
            _ => None,
        }
    }

    /// Whether play has ended (a goal reached or a side wiped out).
    #[must_use]
    pub fn is_terminal(&self, board: &Board) -> bool {
        self.result(board).is_some()
    }

    /// Decided result, `None` while play continues.
    #[must_use]
    pub fn result(&self, board: &Board) -> Option<GameResult> {
        if let Some(m) = self.winner(board) {
            return Some(GameResult::Winner(m));
        }
        let empty = board.pieces_of(Marker::AI).next().is_none()
            && board.pieces_of(Marker::PLAYER).next().is_none();
        empty.then_some(GameResult::Draw)
    }

    /// Static evaluation: `±GOAL_SCORE` when a piece stands on its goal row,
    /// otherwise advancement, centre control and material.
    #[must_use]
    pub fn evaluate(&self, board: &Board, ai: Marker, player: Marker) -> Score {
        let size = board.size();
        let last = size.saturating_sub(1);

        for col in 0..size {
            if board.get(Cell::new(last, col)).map(Marker::owner) == Some(ai.owner()) {
                return GOAL_SCORE;
            }
            if board.get(Cell::new(0, col)).map(Marker::owner) == Some(player.owner()) {
                return -GOAL_SCORE;
            }
        }

        let centre = (size / 2) as Score;
        let mut score: Score = 0;
        let mut ai_count: Score = 0;
        let mut player_count: Score = 0;

        for (cell, value) in board.cells() {
            let Some(owner) = value.map(Marker::owner) else {
                continue;
            };
            let row = cell.row as Score;
            let off_centre = (cell.col as Score - centre).abs();

            if owner == ai.owner() {
                ai_count += 1;
                score += row * 2 - off_centre;
            } else if owner == player.owner() {
                player_count += 1;
                score -= (last as Score - row) * 2 - off_centre;
            }
        }

        score + MATERIAL_WEIGHT * (ai_count - player_count)
    }
}

impl RulesEngine for RaceGame {
    fn name(&self) -> &'static str {
        "race"
    }

    fn sources(&self, board: &Board, side: Marker) -> Sources {
        board.pieces_of(side).map(|(cell, _)| Some(cell)).collect()
    }

    fn destinations(
        &self,
        board: &Board,
        source: Option<Cell>,
        side: Marker,
        opponent: Marker,
    ) -> Destinations {
        let Some(source) = source else {
            return Destinations::new();
        };
        let piece = board.get(source).unwrap_or(side);
        self.generate_moves(board, source, piece, opponent)
    }

    fn terminal_score(&self, board: &Board, ai: Marker, player: Marker, _ply: u32) -> Option<Score> {
        self.is_terminal(board)
            .then(|| RaceGame::evaluate(self, board, ai, player))
    }

    fn evaluate(&self, board: &Board, ai: Marker, player: Marker) -> Score {
        RaceGame::evaluate(self, board, ai, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    fn lone_piece(size: usize, cell: Cell, marker: Marker) -> Board {
        let mut board = Board::new(size);
        board.set(cell, Some(marker));
        board
    }

    #[test]
    fn test_ai_corner_moves() {
        let board = lone_piece(5, Cell::new(0, 0), Marker::AI);
        let moves = RaceGame.generate_moves(&board, Cell::new(0, 0), Marker::AI, Marker::PLAYER);
        assert_eq!(moves.as_slice(), &[Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn test_player_moves_up() {
        let board = lone_piece(5, Cell::new(4, 2), Marker::PLAYER);
        let moves = RaceGame.generate_moves(&board, Cell::new(4, 2), Marker::PLAYER, Marker::AI);
        assert_eq!(moves.as_slice(), &[Cell::new(3, 2), Cell::new(3, 1), Cell::new(3, 3)]);
    }

    #[test]
    fn test_shielded_moves_everywhere() {
        let shielded = Marker::AI.shielded();
        let board = lone_piece(5, Cell::new(2, 2), shielded);
        let moves = RaceGame.generate_moves(&board, Cell::new(2, 2), shielded, Marker::PLAYER);
        assert_eq!(moves.len(), 8);
    }

    #[test]
    fn test_unknown_identity_has_no_moves() {
        let board = lone_piece(5, Cell::new(2, 2), Marker(7));
        assert!(RaceGame
            .generate_moves(&board, Cell::new(2, 2), Marker(7), Marker::PLAYER)
            .is_empty());
    }

    #[test]
    fn test_capture_only_diagonal() {
        let mut board = lone_piece(5, Cell::new(1, 2), Marker::AI);
        board.set(Cell::new(2, 2), Some(Marker::PLAYER));
        board.set(Cell::new(2, 3), Some(Marker::PLAYER));
        board.set(Cell::new(2, 1), Some(Marker::AI));

        let moves = RaceGame.generate_moves(&board, Cell::new(1, 2), Marker::AI, Marker::PLAYER);
        // Straight ahead is blocked, own piece is blocked, diagonal enemy is a capture
        assert_eq!(moves.as_slice(), &[Cell::new(2, 3)]);
    }

    #[test]
    fn test_shielded_opponent_not_capturable() {
        let mut board = lone_piece(5, Cell::new(1, 2), Marker::AI);
        board.set(Cell::new(2, 3), Some(Marker::PLAYER.shielded()));

        let moves = RaceGame.generate_moves(&board, Cell::new(1, 2), Marker::AI, Marker::PLAYER);
        assert_eq!(moves.as_slice(), &[Cell::new(2, 2), Cell::new(2, 1)]);
    }

    #[test]
    fn test_sources_include_shielded_pieces() {
        let mut board = lone_piece(5, Cell::new(0, 0), Marker::AI);
        board.set(Cell::new(1, 3), Some(Marker::AI.shielded()));
        board.set(Cell::new(4, 4), Some(Marker::PLAYER));

        let sources = RaceGame.sources(&board, Marker::AI);
        assert_eq!(sources.as_slice(), &[Some(Cell::new(0, 0)), Some(Cell::new(1, 3))]);

        // The shielded piece uses its own identity for directions
        let moves = RaceGame.legal_moves(&board, Marker::AI, Marker::PLAYER);
        assert_eq!(moves.len(), 2 + 8);
    }

    #[test]
    fn test_initial_board_layout() {
        let board = RaceGame::initial_board(6);
        assert_eq!(board.get(Cell::new(0, 0)), Some(Marker::AI));
        assert_eq!(board.get(Cell::new(0, 1)), None);
        assert_eq!(board.get(Cell::new(1, 1)), Some(Marker::AI));
        assert_eq!(board.get(Cell::new(5, 1)), Some(Marker::PLAYER));
        assert_eq!(board.get(Cell::new(4, 0)), Some(Marker::PLAYER));
        assert_eq!(board.pieces_of(Marker::AI).count(), 6);
        assert_eq!(board.pieces_of(Marker::PLAYER).count(), 6);
        assert!(!RaceGame.is_terminal(&board));
    }

    #[test]
    fn test_evaluate_goal_rows() {
        let mut board = lone_piece(5, Cell::new(4, 1), Marker::AI);
        board.set(Cell::new(3, 3), Some(Marker::PLAYER));
        assert_eq!(RaceGame.evaluate(&board, Marker::AI, Marker::PLAYER), GOAL_SCORE);

        let mut board = lone_piece(5, Cell::new(0, 1), Marker::PLAYER);
        board.set(Cell::new(2, 2), Some(Marker::AI));
        assert_eq!(RaceGame.evaluate(&board, Marker::AI, Marker::PLAYER), -GOAL_SCORE);
    }

    #[test]
    fn test_evaluate_formula() {
        // 5x5, centre column 2
        let mut board = lone_piece(5, Cell::new(1, 2), Marker::AI);
        board.set(Cell::new(2, 0), Some(Marker::AI));
        board.set(Cell::new(3, 2), Some(Marker::PLAYER));

        // ai: (1*2 - 0) + (2*2 - 2) = 4
        // player: (4-3)*2 - 0 = 2
        // material: 10 * (2 - 1) = 10
        assert_eq!(RaceGame.evaluate(&board, Marker::AI, Marker::PLAYER), 4 - 2 + 10);
    }

    #[test]
    fn test_winner_and_terminal() {
        let mut board = lone_piece(5, Cell::new(2, 2), Marker::AI);
        board.set(Cell::new(3, 3), Some(Marker::PLAYER));
        assert_eq!(RaceGame.winner(&board), None);

        board.apply(Move::step(Cell::new(2, 2), Cell::new(3, 3)), Marker::AI);
        assert_eq!(RaceGame.winner(&board), Some(Marker::AI));
        assert_eq!(RaceGame.result(&board), Some(GameResult::Winner(Marker::AI)));
        assert_eq!(
            RaceGame.terminal_score(&board, Marker::AI, Marker::PLAYER, 3),
            Some(RaceGame.evaluate(&board, Marker::AI, Marker::PLAYER))
        );
    }

    #[test]
    fn test_empty_board_is_draw() {
        assert_eq!(RaceGame.result(&Board::new(5)), Some(GameResult::Draw));
    }
}
