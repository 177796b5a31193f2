//! Rules engine trait for game variants.
//!
//! The search engines are generic over `RulesEngine`; the row game and the
//! race game in `games` are the two implementations.

pub mod engine;

pub use engine::{Destinations, GameResult, RulesEngine, Score, Sources, SCORE_INF};
