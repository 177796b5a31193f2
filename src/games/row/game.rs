//! Row game rules and evaluator.

use smallvec::smallvec;

use crate::core::{Board, Cell, Marker};
use crate::rules::{Destinations, GameResult, RulesEngine, Score, Sources};

/// Value of a completed line before the ply adjustment.
pub const WIN_SCORE: Score = 10;

/// Bonus for holding the centre of a 3x3 board.
pub const CENTER_BONUS: Score = 2;

/// One scoring line of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Col(usize),
    Diagonal,
    AntiDiagonal,
}

impl Line {
    /// Every line of a `size`x`size` board: rows, columns, then both diagonals.
    pub fn all(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Col))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Cells along this line.
    pub fn cells(self, size: usize) -> impl Iterator<Item = Cell> {
        (0..size).map(move |i| match self {
            Line::Row(r) => Cell::new(r, i),
            Line::Col(c) => Cell::new(i, c),
            Line::Diagonal => Cell::new(i, i),
            Line::AntiDiagonal => Cell::new(i, size - 1 - i),
        })
    }
}

/// The 3-in-a-row placement game (3x3 or 4x4, a full line wins).
#[derive(Clone, Copy, Debug, Default)]
pub struct RowGame;

impl RowGame {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Every empty cell, row-major.
    #[must_use]
    pub fn generate_moves(&self, board: &Board) -> Destinations {
        board
            .cells()
            .filter(|(_, v)| v.is_none())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Marker owning a completed line, if any.
    #[must_use]
    pub fn winner(&self, board: &Board) -> Option<Marker> {
        let size = board.size();
        Line::all(size).find_map(|line| {
            let mut cells = line.cells(size);
            let first = board.get(cells.next()?)?;
            cells.all(|c| board.get(c) == Some(first)).then_some(first)
        })
    }

    /// Winner, draw on a full board, or `None` while play continues.
    #[must_use]
    pub fn result(&self, board: &Board) -> Option<GameResult> {
        match self.winner(board) {
            Some(m) => Some(GameResult::Winner(m)),
            None if board.is_full() => Some(GameResult::Draw),
            None => None,
        }
    }

    /// Partial credit for one line: `+n` for n ai marks alone, `-n` for n
    /// player marks alone, 0 when mixed or empty.
    #[must_use]
    pub fn evaluate_line(&self, board: &Board, line: Line, ai: Marker, player: Marker) -> Score {
        let (mut ai_count, mut player_count) = (0, 0);
        for cell in line.cells(board.size()) {
            match board.get(cell) {
                Some(m) if m == ai => ai_count += 1,
                Some(m) if m == player => player_count += 1,
                _ => {}
            }
        }

        match (ai_count, player_count) {
            (a, 0) => a,
            (0, p) => -p,
            _ => 0,
        }
    }

    /// Static evaluation: `±WIN_SCORE` for a completed line, otherwise summed
    /// line credit plus the centre bonus.
    #[must_use]
    pub fn evaluate(&self, board: &Board, ai: Marker, player: Marker) -> Score {
        match self.winner(board) {
            Some(m) if m == ai => return WIN_SCORE,
            Some(m) if m == player => return -WIN_SCORE,
            _ => {}
        }

        let size = board.size();
        let mut score: Score = Line::all(size)
            .map(|line| self.evaluate_line(board, line, ai, player))
            .sum();

        if size == 3 && board.get(Cell::new(1, 1)) == Some(ai) {
            score += CENTER_BONUS;
        }

        score
    }
}

impl RulesEngine for RowGame {
    fn name(&self) -> &'static str {
        "row"
    }

    fn sources(&self, _board: &Board, _side: Marker) -> Sources {
        smallvec![None]
    }

    fn destinations(
        &self,
        board: &Board,
        _source: Option<Cell>,
        _side: Marker,
        _opponent: Marker,
    ) -> Destinations {
        self.generate_moves(board)
    }

    fn terminal_score(&self, board: &Board, ai: Marker, _player: Marker, ply: u32) -> Option<Score> {
        let ply = ply as Score;
        self.winner(board).map(|m| {
            if m == ai {
                WIN_SCORE - ply
            } else {
                ply - WIN_SCORE
            }
        })
    }

    fn evaluate(&self, board: &Board, ai: Marker, player: Marker) -> Score {
        RowGame::evaluate(self, board, ai, player)
    }
}
