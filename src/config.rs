//! Tool configuration.
//!
//! Canvas size, grid spacing, the closure tolerance, and the
//! consistency warning threshold are tuning parameters rather than
//! algorithmic invariants, so they live in a serializable config that
//! hosts can export and import alongside their own settings.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Tunable parameters for one measurement tool instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Version of the configuration format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Drawing canvas width in pixels
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f32,

    /// Drawing canvas height in pixels
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f32,

    /// Background grid spacing in pixels
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f32,

    /// Radius around the first vertex within which a click closes the shape
    #[serde(default = "default_close_tolerance")]
    pub close_tolerance_px: f32,

    /// Consistency percentage above which a calibration warning is logged
    #[serde(default = "default_consistency_warn")]
    pub consistency_warn_percent: f32,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_canvas_width() -> f32 {
    constants::CANVAS_WIDTH
}

fn default_canvas_height() -> f32 {
    constants::CANVAS_HEIGHT
}

fn default_grid_spacing() -> f32 {
    constants::GRID_SPACING
}

fn default_close_tolerance() -> f32 {
    constants::CLOSE_TOLERANCE_PX
}

fn default_consistency_warn() -> f32 {
    constants::CONSISTENCY_WARN_PERCENT
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            canvas_width: constants::CANVAS_WIDTH,
            canvas_height: constants::CANVAS_HEIGHT,
            grid_spacing: constants::GRID_SPACING,
            close_tolerance_px: constants::CLOSE_TOLERANCE_PX,
            consistency_warn_percent: constants::CONSISTENCY_WARN_PERCENT,
        }
    }
}

impl ToolConfig {
    /// Export to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import from a JSON string. Missing fields fall back to their
    /// defaults, so configs from older versions keep loading.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
