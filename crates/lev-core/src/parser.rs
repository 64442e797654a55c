//! Parser for the level JSON format → `GridMap`.
//!
//! The whole input is decoded and validated before a `GridMap` is built,
//! so a failed parse never yields a partially populated level.

use crate::error::{LevelError, Result};
use crate::model::{GridMap, LevelFile};

/// Parse a level document.
///
/// # Errors
/// `MalformedLevel` when the text is not JSON, a required field is missing or
/// has the wrong type, the block buffer does not match `width * height`, or a
/// control point is invalid.
#[must_use = "parsing result should be used"]
pub fn parse_level(input: &str) -> Result<GridMap> {
    let file: LevelFile =
        serde_json::from_str(input).map_err(|e| LevelError::MalformedLevel(e.to_string()))?;
    let map = GridMap::try_from(file)?;
    log::debug!(
        "parsed {}x{} level with {} elevators",
        map.width(),
        map.height(),
        map.elevators().len()
    );
    Ok(map)
}

/// Parse a level from raw file bytes (UTF-8 JSON).
#[must_use = "parsing result should be used"]
pub fn parse_level_bytes(bytes: &[u8]) -> Result<GridMap> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LevelError::MalformedLevel(format!("level file is not UTF-8: {e}")))?;
    parse_level(text)
}
