//! Board model: square grid of optional markers, moves, and in-place apply/undo.
//!
//! ## Markers
//!
//! Piece identities are small integers. The base identities are
//! [`Marker::PLAYER`] (1) and [`Marker::AI`] (2). A shielded piece carries its
//! base identity plus [`Marker::SHIELD_OFFSET`]; anything above the threshold
//! counts as shielded.
//!
//! ## Apply/undo
//!
//! Search never clones per node. It applies a move in place, recurses, and
//! restores the board from the returned [`UndoInfo`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
}

/// Piece identity stored in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Marker(pub u8);

impl Marker {
    /// The human player's piece (moves toward row 0 in the race game).
    pub const PLAYER: Marker = Marker(1);

    /// The engine's piece (moves toward the last row in the race game).
    pub const AI: Marker = Marker(2);

    /// Offset added to a base identity to mark it shielded.
    pub const SHIELD_OFFSET: u8 = 10;

    /// Create a marker from its raw identity.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw identity value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Whether this identity is above the shield threshold.
    #[must_use]
    pub const fn is_shielded(self) -> bool {
        self.0 > Self::SHIELD_OFFSET
    }

    /// The shielded variant of this marker. Already-shielded markers are unchanged.
    #[must_use]
    pub const fn shielded(self) -> Self {
        if self.is_shielded() {
            self
        } else {
            Self(self.0 + Self::SHIELD_OFFSET)
        }
    }

    /// Base identity with any shield removed.
    #[must_use]
    pub const fn owner(self) -> Self {
        if self.is_shielded() {
            Self(self.0 - Self::SHIELD_OFFSET)
        } else {
            self
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_shielded() {
            write!(f, "Marker({}*)", self.owner().0)
        } else {
            write!(f, "Marker({})", self.0)
        }
    }
}

/// Grid coordinates, row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step by a signed offset, returning `None` when leaving a `size`x`size` board.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize, size: usize) -> Option<Cell> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Cell { row, col })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A move: placement (`from` is `None`) or a step from one cell to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Option<Cell>,
    pub to: Cell,
}

impl Move {
    /// Place a new marker on `to`.
    #[must_use]
    pub const fn place(to: Cell) -> Self {
        Self { from: None, to }
    }

    /// Move the piece on `from` to `to`.
    #[must_use]
    pub const fn step(from: Cell, to: Cell) -> Self {
        Self { from: Some(from), to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.from {
            Some(from) => write!(f, "({},{})->({},{})", from.row, from.col, self.to.row, self.to.col),
            None => write!(f, "({},{})", self.to.row, self.to.col),
        }
    }
}

/// What a move displaced, enough to restore the board exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoInfo {
    /// Marker that ended up on the destination.
    pub moved: Marker,
    /// Previous content of the destination (a captured piece).
    pub captured: Option<Marker>,
}

/// Square grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Marker>>,
}

impl Board {
    /// Create an empty `size`x`size` board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from rows of raw identities (`None` = empty).
    ///
    /// ```
    /// use grid_duel::core::{Board, Cell, Marker};
    ///
    /// let board = Board::from_rows(&[
    ///     vec![Some(1), None, None],
    ///     vec![Some(1), Some(2), None],
    ///     vec![None, None, None],
    /// ]).unwrap();
    /// assert_eq!(board.get(Cell::new(1, 1)), Some(Marker::AI));
    /// ```
    pub fn from_rows(rows: &[Vec<Option<u8>>]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            cells.extend(values.iter().map(|v| v.map(Marker)));
        }

        Ok(Self { size, cells })
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    /// Content of a cell.
    #[must_use]
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Marker> {
        self.cells[self.index(cell)]
    }

    /// Overwrite a cell.
    #[inline]
    pub fn set(&mut self, cell: Cell, value: Option<Marker>) {
        let idx = self.index(cell);
        self.cells[idx] = value;
    }

    /// Check whether a cell is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterate all cells with their content, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Option<Marker>)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (Cell::new(i / size, i % size), *v))
    }

    /// Cells holding a piece owned by `owner` (base or shielded), row-major.
    pub fn pieces_of(&self, owner: Marker) -> impl Iterator<Item = (Cell, Marker)> + '_ {
        self.cells()
            .filter_map(move |(cell, v)| v.filter(|m| m.owner() == owner.owner()).map(|m| (cell, m)))
    }

    /// Row `row` as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Option<Marker>] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Apply a move in place.
    ///
    /// Placements put `marker` on the destination. Steps carry whatever sits
    /// on `from` (so shielded pieces stay shielded) and ignore `marker`.
    pub fn apply(&mut self, mv: Move, marker: Marker) -> UndoInfo {
        let moved = match mv.from {
            Some(from) => {
                let piece = self.get(from).unwrap_or(marker);
                self.set(from, None);
                piece
            }
            None => marker,
        };
        let captured = self.get(mv.to);
        self.set(mv.to, Some(moved));
        UndoInfo { moved, captured }
    }

    /// Reverse a move previously applied with [`Board::apply`].
    pub fn undo(&mut self, mv: Move, undo: UndoInfo) {
        self.set(mv.to, undo.captured);
        if let Some(from) = mv.from {
            self.set(from, Some(undo.moved));
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for value in self.row(row) {
                match value {
                    Some(m) => write!(f, "{:>3}", m.0)?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
