//! Error types raised by the level model and its file formats.

use thiserror::Error;

/// Errors surfaced by level operations.
///
/// None of these are fatal: callers that paint or pick treat `OutOfBounds`
/// as "ignore the input", and a failed open leaves the previous level alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("malformed level: {0}")]
    MalformedLevel(String),

    #[error("malformed block catalog: {0}")]
    MalformedCatalog(String),

    #[error("invalid level dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("no level is open")]
    NoActiveLevel,

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, LevelError>;
