//! Read-only views handed to external collaborators.
//!
//! [`RenderSnapshot`] carries everything the drawing surface needs for
//! one frame; [`MeasurementRecord`] is the serializable payload handed
//! to the persistence layer when a finished measurement is saved.

use serde::{Deserialize, Serialize};

use crate::engine::MeasureEngine;
use crate::geometry::Point;

/// Per-frame view of the drawing for the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    /// Ordered vertices, winding order = insertion order.
    pub vertices: Vec<Point>,
    /// Whether the polygon has closed.
    pub closed: bool,
    /// Hovered vertex for highlighting, if any.
    pub active_vertex: Option<usize>,
    /// One label per wall; empty while the shape is open.
    pub walls: Vec<WallLabel>,
}

/// Placement and text for one wall's on-canvas label.
#[derive(Debug, Clone, PartialEq)]
pub struct WallLabel {
    pub index: usize,
    pub pixel_length: f32,
    pub user_feet: Option<f32>,
    /// `"12.50 ft"` when calibrated, `"140 px"` otherwise.
    pub label: String,
    /// Wall midpoint, where the label anchors.
    pub midpoint: Point,
    /// Label rotation along the wall, in degrees.
    pub angle_deg: f32,
}

impl RenderSnapshot {
    pub fn capture(engine: &MeasureEngine) -> Self {
        let vertices = engine.vertices().to_vec();
        let n = vertices.len();
        let walls = engine
            .walls()
            .iter()
            .enumerate()
            .map(|(i, wall)| {
                let a = vertices[i];
                let b = vertices[(i + 1) % n];
                WallLabel {
                    index: i,
                    pixel_length: wall.pixel_length,
                    user_feet: wall.user_feet,
                    label: match wall.user_feet {
                        Some(feet) => format!("{feet:.2} ft"),
                        None => format!("{:.0} px", wall.pixel_length),
                    },
                    midpoint: a.midpoint(&b),
                    angle_deg: a.angle_to_deg(&b),
                }
            })
            .collect();
        Self {
            vertices,
            closed: engine.is_closed(),
            active_vertex: engine.active_vertex(),
            walls,
        }
    }
}

/// A finalized measurement for the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub points: Vec<Point>,
    pub walls: Vec<WallRecord>,
    pub area_sq_ft: f32,
    pub scale_ft_per_px: f32,
    pub consistency_percent: Option<f32>,
}

/// One wall in a saved measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub pixel_length: f32,
    pub user_length_feet: Option<f32>,
}

impl MeasurementRecord {
    /// Capture the current measurement. `None` while the shape is
    /// still open; only closed shapes are saved.
    pub fn capture(engine: &MeasureEngine) -> Option<Self> {
        if !engine.is_closed() {
            return None;
        }
        Some(Self {
            points: engine.vertices().to_vec(),
            walls: engine
                .walls()
                .iter()
                .map(|wall| WallRecord {
                    pixel_length: wall.pixel_length,
                    user_length_feet: wall.user_feet,
                })
                .collect(),
            area_sq_ft: engine.area_sq_ft(),
            scale_ft_per_px: engine.scale_ft_per_px(),
            consistency_percent: engine.scale_consistency_percent(),
        })
    }

    /// Export to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to compact JSON.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Import from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
