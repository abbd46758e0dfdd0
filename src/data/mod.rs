pub mod cell;
pub mod difficulty;
pub mod minefield;

pub use cell::Cell;
pub use difficulty::Difficulty;
pub use minefield::Minefield;
