//! WallTrace - polygon square-footage measurement.
//!
//! The measurement core behind a contractor bid tool: click to place
//! axis-snapped corners on a canvas, close the shape near the first
//! corner, enter known wall lengths in feet, and derive the floor
//! area in square feet from the median per-wall scale.
//!
//! Rendering, persistence, and session handling are external
//! collaborators; they receive read-only snapshots and feed input
//! events back in.

mod config;
mod constants;
mod engine;
mod error;
mod geometry;
mod handlers;
mod message;
mod snapshot;

pub use config::{ToolConfig, CONFIG_VERSION};
pub use constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CLOSE_TOLERANCE_PX, CONSISTENCY_WARN_PERCENT, GRID_SPACING,
    MIN_POLYGON_VERTICES,
};
pub use engine::{AddVertex, MeasureEngine, Wall};
pub use error::{MeasureError, Result};
pub use geometry::{median, polygon_area_px, snap_to_nearest_axis, Point};
pub use handlers::handle_tool_message;
pub use message::ToolMessage;
pub use snapshot::{MeasurementRecord, RenderSnapshot, WallLabel, WallRecord};
