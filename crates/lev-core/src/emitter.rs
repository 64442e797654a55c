//! Emitter: `GridMap` → level JSON.
//!
//! Field names match the parser exactly, so `parse_level(emit_level(m))`
//! reproduces `m`.

use crate::error::{LevelError, Result};
use crate::model::{GridMap, LevelFile};

/// Emit a level as compact JSON.
pub fn emit_level(map: &GridMap) -> Result<String> {
    serde_json::to_string(&LevelFile::from(map)).map_err(|e| LevelError::Serialization(e.to_string()))
}

/// Emit a level as indented JSON, for files meant to be read by people.
pub fn emit_level_pretty(map: &GridMap) -> Result<String> {
    serde_json::to_string_pretty(&LevelFile::from(map))
        .map_err(|e| LevelError::Serialization(e.to_string()))
}
