//! Editor configuration.
//!
//! Every field has a default, so hosts may pass a partial JSON object.

use serde::{Deserialize, Serialize};

/// Tunables shared by the editor, planner, and renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Pixel size of one cell at zoom 1.0.
    pub cell_size: f64,
    /// Zoom multiplier per zoom-in step; zoom-out divides by it.
    pub zoom_step: f64,
    /// Elevator hit radius in fractional cell units.
    pub hit_radius: f64,
    /// Period of the sprite animation tick.
    pub animation_interval_ms: u32,
    /// Size used by "new level" when the host does not ask for one.
    pub default_width: u32,
    pub default_height: u32,
    /// Control point marker radius, in grid pixels.
    pub marker_radius: f64,
    /// Marker radius for the first point of a path.
    pub first_marker_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            zoom_step: 1.2,
            hit_radius: 0.1,
            animation_interval_ms: 700,
            default_width: 20,
            default_height: 20,
            marker_radius: 4.0,
            first_marker_radius: 6.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
