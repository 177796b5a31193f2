//! Race game: a checkers-like race to the far row on a 5x5 to 8x8 grid.
//!
//! - Player pieces step toward row 0, ai pieces toward the last row
//! - Shielded pieces (identity above 10) step in all eight directions
//! - Diagonal steps onto an unshielded opponent capture it
//! - First piece on its goal row wins; a side with no pieces loses

mod game;

pub use game::{RaceGame, GOAL_SCORE, MATERIAL_WEIGHT};
