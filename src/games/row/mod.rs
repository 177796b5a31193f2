//! Row game: place markers on a 3x3 or 4x4 grid, a full line wins.
//!
//! - Any empty cell is a legal placement
//! - A completed row, column or diagonal ends the game
//! - Leaves are scored by per-line partial credit plus a 3x3 centre bonus

mod game;

pub use game::{Line, RowGame, CENTER_BONUS, WIN_SCORE};
