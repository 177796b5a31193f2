//! Adversarial search engines for grid-duel.
//!
//! ## Overview
//!
//! Two engines share one contract: given a board, the searching side's
//! marker and the opponent's marker, return a move (or `None` when there is
//! none) plus the statistics gathered while choosing it.
//!
//! - **`MinimaxSearch`**: every node visited, no pruning. Also builds the
//!   shallow `DecisionNode` tree used by the teaching view.
//! - **`AlphaBetaSearch`**: same values with cutoffs, shuffled root order,
//!   a time budget, and a sampling call that only fills in statistics.
//!
//! Both copy the caller's board once and search it with apply/undo.
//! Randomness and time are injected, so tests can pin them down.
//!
//! ## Usage
//!
//! ```rust
//! use grid_duel::core::{Board, Cell, Marker, Move, SearchConfig};
//! use grid_duel::games::RowGame;
//! use grid_duel::search::MinimaxSearch;
//!
//! let board = Board::from_rows(&[
//!     vec![Some(2), None, None],
//!     vec![Some(2), Some(1), None],
//!     vec![None, Some(1), Some(1)],
//! ]).unwrap();
//!
//! let mut search = MinimaxSearch::new(RowGame, SearchConfig::for_minimax().with_seed(1));
//! let mv = search.get_best_move(&board, Marker::AI, Marker::PLAYER);
//! assert_eq!(mv, Some(Move::place(Cell::new(2, 0))));
//! ```

pub mod alphabeta;
pub mod minimax;
pub mod result;
pub mod stats;
pub mod tree;

pub use alphabeta::AlphaBetaSearch;
pub use minimax::MinimaxSearch;
pub use result::SearchResult;
pub use stats::{PruningEvent, SearchStats};
pub use tree::{DecisionNode, TREE_REPLY_LIMIT};
