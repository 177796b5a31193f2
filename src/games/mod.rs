//! Game variants implementing `RulesEngine`.

pub mod race;
pub mod row;

pub use race::RaceGame;
pub use row::RowGame;
