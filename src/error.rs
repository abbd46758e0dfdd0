use thiserror::Error;

/// Errors raised by the game engine itself. Everything here is either fatal
/// to a construction attempt or recoverable by the caller; the engine never
/// logs or swallows a failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("minefield dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("coordinate ({row}, {col}) is outside the minefield")]
    CoordinateOutOfRange { row: usize, col: usize },
    #[error("{0}")]
    InvalidOperation(&'static str),
}
