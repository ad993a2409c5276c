//! Global defaults for the WallTrace tool.
//!
//! These are presentation and tuning parameters, not algorithmic
//! invariants; [`crate::ToolConfig`] lets hosts override them.

/// Default drawing canvas width in pixels.
pub const CANVAS_WIDTH: f32 = 1000.0;

/// Default drawing canvas height in pixels.
pub const CANVAS_HEIGHT: f32 = 620.0;

/// Default background grid spacing in pixels.
pub const GRID_SPACING: f32 = 20.0;

/// Clicking within this distance of the first vertex closes the shape.
pub const CLOSE_TOLERANCE_PX: f32 = 12.0;

/// Minimum number of vertices required to close a shape.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Scale consistency (RMS percent) above which the per-wall
/// calibrations look suspect and a warning is logged.
pub const CONSISTENCY_WARN_PERCENT: f32 = 8.0;
