//! The polygon measurement engine.
//!
//! Owns the ordered vertex sequence, the one-way closure flag, and the
//! per-wall calibration input. Derived quantities (wall pixel lengths,
//! areas, scales) are recomputed from the current vertices on every
//! read, so dragging a corner can never leave them out of sync.

use crate::config::ToolConfig;
use crate::constants::MIN_POLYGON_VERTICES;
use crate::error::{MeasureError, Result};
use crate::geometry::{self, Point};

/// Outcome of an accepted [`MeasureEngine::add_vertex`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddVertex {
    /// The point was appended as vertex `index`.
    Appended { index: usize },
    /// The click landed within the closure tolerance of the first
    /// vertex and closed the shape; no vertex was added.
    Closed,
}

/// A wall of the closed shape: its pixel length, derived from the
/// current vertex positions, and the user-entered length in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub pixel_length: f32,
    pub user_feet: Option<f32>,
}

/// Measurement state for one drawing session.
///
/// Single-threaded and synchronous: each operation completes before
/// the next input event is dispatched, and nothing is shared.
#[derive(Debug, Clone)]
pub struct MeasureEngine {
    config: ToolConfig,
    vertices: Vec<Point>,
    closed: bool,
    /// User-entered wall lengths in feet. One slot per wall, created
    /// at closure; survives vertex drags until explicitly cleared.
    wall_feet: Vec<Option<f32>>,
    /// Vertex currently hovered, for highlight rendering only. No
    /// geometric computation reads this.
    active_vertex: Option<usize>,
}

impl MeasureEngine {
    pub fn new() -> Self {
        Self::with_config(ToolConfig::default())
    }

    pub fn with_config(config: ToolConfig) -> Self {
        Self {
            config,
            vertices: Vec::new(),
            closed: false,
            wall_feet: Vec::new(),
            active_vertex: None,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the shape has closed. One-way; only [`reset`] returns
    /// the engine to the open state.
    ///
    /// [`reset`]: MeasureEngine::reset
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Accept a click on the canvas.
    ///
    /// After the first vertex, the candidate is axis-snapped against
    /// the previous vertex, so every wall drawn during construction is
    /// horizontal or vertical. Once at least 3 vertices exist, a click
    /// within the closure tolerance of the first vertex closes the
    /// shape instead of appending.
    pub fn add_vertex(&mut self, raw: Point) -> Result<AddVertex> {
        if self.closed {
            return Err(MeasureError::ShapeClosed);
        }

        let candidate = match self.vertices.last() {
            Some(prev) => geometry::snap_to_nearest_axis(*prev, raw),
            None => raw,
        };

        if self.vertices.len() >= MIN_POLYGON_VERTICES
            && candidate.distance_to(&self.vertices[0]) < self.config.close_tolerance_px
        {
            self.closed = true;
            self.wall_feet = vec![None; self.vertices.len()];
            return Ok(AddVertex::Closed);
        }

        self.vertices.push(candidate);
        Ok(AddVertex::Appended {
            index: self.vertices.len() - 1,
        })
    }

    /// Drag a vertex to a new position, axis-snapped.
    ///
    /// The snap reference is the previous vertex in the cycle. Special
    /// case: dragging vertex 0 of a still-open shape snaps against
    /// vertex 1, since wrapping to the last vertex is meaningless
    /// before closure. A lone vertex moves freely.
    pub fn move_vertex(&mut self, index: usize, raw: Point) -> Result<()> {
        let n = self.vertices.len();
        if index >= n {
            return Err(MeasureError::VertexOutOfRange { index, count: n });
        }

        let reference = if n <= 1 {
            None
        } else if !self.closed && index == 0 {
            Some(self.vertices[1])
        } else {
            Some(self.vertices[(index + n - 1) % n])
        };

        self.vertices[index] = match reference {
            Some(r) => geometry::snap_to_nearest_axis(r, raw),
            None => raw,
        };
        Ok(())
    }

    /// Set or clear a wall's real-world length in feet.
    ///
    /// Negative or non-finite values are ignored (the previous value
    /// is kept); `None` clears the calibration.
    pub fn set_wall_feet(&mut self, index: usize, feet: Option<f32>) -> Result<()> {
        self.require_wall(index)?;
        match feet {
            Some(v) if !v.is_finite() || v < 0.0 => {
                log::debug!("ignoring invalid length {v} for wall {index}");
            }
            other => self.wall_feet[index] = other,
        }
        Ok(())
    }

    /// Apply raw text from a wall's length field.
    ///
    /// Forgiving by design for live editing: empty input clears the
    /// calibration, a finite non-negative number sets it, and anything
    /// else keeps the previous value without raising an error.
    pub fn wall_length_input(&mut self, index: usize, raw: &str) -> Result<()> {
        self.require_wall(index)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.wall_feet[index] = None;
            return Ok(());
        }
        match trimmed.parse::<f32>() {
            Ok(feet) if feet.is_finite() && feet >= 0.0 => {
                self.wall_feet[index] = Some(feet);
            }
            _ => {
                log::debug!("keeping previous length for wall {index}: input {raw:?} is not a non-negative number");
            }
        }
        Ok(())
    }

    /// Clear everything back to the empty, open state.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.wall_feet.clear();
        self.closed = false;
        self.active_vertex = None;
    }

    /// Set the hovered vertex for highlight rendering.
    pub fn set_active_vertex(&mut self, index: Option<usize>) {
        self.active_vertex = index;
    }

    pub fn active_vertex(&self) -> Option<usize> {
        self.active_vertex
    }

    /// The walls of the closed shape, pixel lengths freshly derived
    /// from the current vertices. Empty while the shape is open.
    pub fn walls(&self) -> Vec<Wall> {
        if !self.closed {
            return Vec::new();
        }
        let n = self.vertices.len();
        (0..n)
            .map(|i| Wall {
                pixel_length: self.vertices[i].distance_to(&self.vertices[(i + 1) % n]),
                user_feet: self.wall_feet[i],
            })
            .collect()
    }

    pub fn wall_count(&self) -> usize {
        if self.closed {
            self.vertices.len()
        } else {
            0
        }
    }

    /// Polygon area in square pixels (shoelace). 0 under 3 vertices.
    pub fn pixel_area(&self) -> f32 {
        geometry::polygon_area_px(&self.vertices)
    }

    /// Per-wall scales in ft/px, for walls with a user length and a
    /// positive pixel length. Uncalibrated walls are excluded, not
    /// zero-filled.
    pub fn wall_scales(&self) -> Vec<f32> {
        self.walls()
            .iter()
            .filter_map(|wall| match wall.user_feet {
                Some(feet) if wall.pixel_length > 0.0 => {
                    let scale = feet / wall.pixel_length;
                    scale.is_finite().then_some(scale)
                }
                _ => None,
            })
            .collect()
    }

    /// Aggregate ft/px scale: the median of the per-wall scales, so a
    /// single mis-measured wall cannot skew the result. 0 when no wall
    /// is calibrated.
    pub fn scale_ft_per_px(&self) -> f32 {
        geometry::median(&self.wall_scales())
    }

    /// RMS relative deviation of the per-wall scales from their mean,
    /// as a percentage. `None` with fewer than 2 calibrated walls,
    /// where consistency is undefined.
    pub fn scale_consistency_percent(&self) -> Option<f32> {
        let scales = self.wall_scales();
        if scales.len() < 2 {
            return None;
        }
        let mean = scales.iter().sum::<f32>() / scales.len() as f32;
        if mean == 0.0 {
            return Some(0.0);
        }
        let rms = (scales.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>()
            / scales.len() as f32)
            .sqrt();
        Some(rms / mean * 100.0)
    }

    /// Real-world area: pixel area times the aggregate scale squared.
    /// 0 when no wall is calibrated.
    pub fn area_sq_ft(&self) -> f32 {
        let scale = self.scale_ft_per_px();
        if scale == 0.0 {
            0.0
        } else {
            self.pixel_area() * scale * scale
        }
    }

    fn require_wall(&self, index: usize) -> Result<()> {
        if !self.closed {
            return Err(MeasureError::ShapeOpen);
        }
        let count = self.wall_feet.len();
        if index >= count {
            return Err(MeasureError::WallOutOfRange { index, count });
        }
        Ok(())
    }
}

impl Default for MeasureEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.001;

    /// Closed 100x50 px rectangle starting at (100, 100).
    fn closed_rectangle() -> MeasureEngine {
        let mut engine = MeasureEngine::new();
        engine.add_vertex(Point::new(100.0, 100.0)).unwrap();
        engine.add_vertex(Point::new(200.0, 103.0)).unwrap();
        engine.add_vertex(Point::new(202.0, 150.0)).unwrap();
        engine.add_vertex(Point::new(100.0, 152.0)).unwrap();
        let outcome = engine.add_vertex(Point::new(102.0, 101.0)).unwrap();
        assert_eq!(outcome, AddVertex::Closed);
        engine
    }

    #[test]
    fn test_vertices_snap_to_axis() {
        let mut engine = MeasureEngine::new();
        engine.add_vertex(Point::new(100.0, 100.0)).unwrap();
        engine.add_vertex(Point::new(180.0, 107.0)).unwrap();
        engine.add_vertex(Point::new(174.0, 190.0)).unwrap();
        engine.add_vertex(Point::new(60.0, 195.0)).unwrap();

        let vs = engine.vertices();
        for pair in vs.windows(2) {
            assert!(
                pair[0].x == pair[1].x || pair[0].y == pair[1].y,
                "edge {:?} -> {:?} is not axis-aligned",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(vs[1], Point::new(180.0, 100.0));
        assert_eq!(vs[2], Point::new(180.0, 190.0));
    }

    #[test]
    fn test_closure_requires_three_vertices() {
        let mut engine = MeasureEngine::new();
        engine.add_vertex(Point::new(100.0, 100.0)).unwrap();
        engine.add_vertex(Point::new(200.0, 100.0)).unwrap();

        // Near the first vertex, but only 2 vertices exist: appended.
        let outcome = engine.add_vertex(Point::new(103.0, 100.0)).unwrap();
        assert!(matches!(outcome, AddVertex::Appended { .. }));
        assert!(!engine.is_closed());
    }

    #[test]
    fn test_closure_creates_walls_from_geometry() {
        let engine = closed_rectangle();
        assert!(engine.is_closed());
        assert_eq!(engine.vertex_count(), 4);
        assert_eq!(engine.wall_count(), 4);

        let walls = engine.walls();
        let vs = engine.vertices();
        for (i, wall) in walls.iter().enumerate() {
            let expected = vs[i].distance_to(&vs[(i + 1) % vs.len()]);
            assert!((wall.pixel_length - expected).abs() < EPS);
            assert_eq!(wall.user_feet, None);
        }
    }

    #[test]
    fn test_add_vertex_after_closure_is_an_error() {
        let mut engine = closed_rectangle();
        let err = engine.add_vertex(Point::new(300.0, 300.0)).unwrap_err();
        assert_eq!(err, MeasureError::ShapeClosed);
        assert_eq!(engine.vertex_count(), 4);
    }

    #[test]
    fn test_pixel_area_rectangle() {
        let engine = closed_rectangle();
        assert!((engine.pixel_area() - 100.0 * 50.0).abs() < EPS);
    }

    #[test]
    fn test_open_shape_has_no_walls_or_scales() {
        let mut engine = MeasureEngine::new();
        engine.add_vertex(Point::new(0.0, 0.0)).unwrap();
        engine.add_vertex(Point::new(100.0, 0.0)).unwrap();
        assert!(engine.walls().is_empty());
        assert!(engine.wall_scales().is_empty());
        assert_eq!(engine.scale_ft_per_px(), 0.0);
        assert_eq!(engine.scale_consistency_percent(), None);
        assert_eq!(engine.area_sq_ft(), 0.0);
    }

    #[test]
    fn test_uniform_calibration() {
        let mut engine = closed_rectangle();
        // 0.1 ft/px on every wall of the 100x50 rectangle.
        engine.set_wall_feet(0, Some(10.0)).unwrap();
        engine.set_wall_feet(1, Some(5.0)).unwrap();
        engine.set_wall_feet(2, Some(10.0)).unwrap();
        engine.set_wall_feet(3, Some(5.0)).unwrap();

        assert!((engine.scale_ft_per_px() - 0.1).abs() < EPS);
        let consistency = engine.scale_consistency_percent().unwrap();
        assert!(consistency.abs() < EPS);
        assert!((engine.area_sq_ft() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_single_calibrated_wall() {
        let mut engine = closed_rectangle();
        engine.set_wall_feet(0, Some(10.0)).unwrap();

        assert_eq!(engine.scale_consistency_percent(), None);
        assert!((engine.scale_ft_per_px() - 0.1).abs() < EPS);
        assert!((engine.area_sq_ft() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_median_scale_resists_one_bad_wall() {
        let mut engine = closed_rectangle();
        engine.set_wall_feet(0, Some(10.0)).unwrap();
        engine.set_wall_feet(1, Some(5.0)).unwrap();
        engine.set_wall_feet(2, Some(10.0)).unwrap();
        // Fat-fingered: 90 ft instead of 5.
        engine.set_wall_feet(3, Some(90.0)).unwrap();

        assert!((engine.scale_ft_per_px() - 0.1).abs() < EPS);
        let consistency = engine.scale_consistency_percent().unwrap();
        assert!(consistency > 8.0, "expected a loud consistency figure, got {consistency}");
    }

    #[test]
    fn test_wall_length_input_parsing() {
        let mut engine = closed_rectangle();

        engine.wall_length_input(0, "12.5").unwrap();
        assert_eq!(engine.walls()[0].user_feet, Some(12.5));

        // Malformed input keeps the previous value.
        engine.wall_length_input(0, "abc").unwrap();
        assert_eq!(engine.walls()[0].user_feet, Some(12.5));

        engine.wall_length_input(0, "-3").unwrap();
        assert_eq!(engine.walls()[0].user_feet, Some(12.5));

        // Empty input clears.
        engine.wall_length_input(0, "").unwrap();
        assert_eq!(engine.walls()[0].user_feet, None);

        engine.wall_length_input(0, "  8 ").unwrap();
        assert_eq!(engine.walls()[0].user_feet, Some(8.0));
    }

    #[test]
    fn test_wall_input_errors() {
        let mut engine = MeasureEngine::new();
        assert_eq!(
            engine.wall_length_input(0, "5").unwrap_err(),
            MeasureError::ShapeOpen
        );

        let mut engine = closed_rectangle();
        assert_eq!(
            engine.set_wall_feet(4, Some(5.0)).unwrap_err(),
            MeasureError::WallOutOfRange { index: 4, count: 4 }
        );
    }

    #[test]
    fn test_move_vertex_snaps_against_previous() {
        let mut engine = closed_rectangle();
        // Vertex 2's previous vertex is vertex 1 at (200, 100).
        engine.move_vertex(2, Point::new(205.0, 160.0)).unwrap();
        assert_eq!(engine.vertices()[2], Point::new(200.0, 160.0));
    }

    #[test]
    fn test_move_first_vertex_of_open_shape_snaps_against_second() {
        let mut engine = MeasureEngine::new();
        engine.add_vertex(Point::new(100.0, 100.0)).unwrap();
        engine.add_vertex(Point::new(200.0, 100.0)).unwrap();
        engine.add_vertex(Point::new(200.0, 180.0)).unwrap();
        engine.add_vertex(Point::new(120.0, 180.0)).unwrap();

        // Mostly vertical relative to vertex 1 at (200, 100): x pins
        // to 200. Snapping against the last vertex at (120, 180)
        // would have produced (195, 180) instead.
        engine.move_vertex(0, Point::new(195.0, 140.0)).unwrap();
        assert_eq!(engine.vertices()[0], Point::new(200.0, 140.0));
    }

    #[test]
    fn test_move_lone_vertex_is_unsnapped() {
        let mut engine = MeasureEngine::new();
        engine.add_vertex(Point::new(100.0, 100.0)).unwrap();
        engine.move_vertex(0, Point::new(37.0, 73.0)).unwrap();
        assert_eq!(engine.vertices()[0], Point::new(37.0, 73.0));
    }

    #[test]
    fn test_move_vertex_out_of_range() {
        let mut engine = MeasureEngine::new();
        assert_eq!(
            engine.move_vertex(0, Point::new(0.0, 0.0)).unwrap_err(),
            MeasureError::VertexOutOfRange { index: 0, count: 0 }
        );
    }

    #[test]
    fn test_drag_updates_pixel_lengths_but_keeps_feet() {
        let mut engine = closed_rectangle();
        engine.set_wall_feet(0, Some(10.0)).unwrap();
        let before = engine.walls()[0].pixel_length;

        // Stretch wall 0 by dragging vertex 1 further right.
        engine.move_vertex(1, Point::new(300.0, 104.0)).unwrap();
        let wall = engine.walls()[0];
        assert!(wall.pixel_length > before);
        assert!((wall.pixel_length - 200.0).abs() < EPS);
        assert_eq!(wall.user_feet, Some(10.0));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut engine = closed_rectangle();
        engine.set_wall_feet(0, Some(10.0)).unwrap();
        engine.set_wall_feet(1, Some(5.0)).unwrap();

        assert_eq!(engine.pixel_area(), engine.pixel_area());
        assert_eq!(engine.scale_ft_per_px(), engine.scale_ft_per_px());
        assert_eq!(engine.area_sq_ft(), engine.area_sq_ft());
        assert_eq!(
            engine.scale_consistency_percent(),
            engine.scale_consistency_percent()
        );
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = closed_rectangle();
        engine.set_wall_feet(0, Some(10.0)).unwrap();
        engine.set_active_vertex(Some(2));
        engine.reset();

        let fresh = MeasureEngine::new();
        assert!(!engine.is_closed());
        assert_eq!(engine.vertex_count(), fresh.vertex_count());
        assert_eq!(engine.pixel_area(), fresh.pixel_area());
        assert_eq!(engine.scale_ft_per_px(), fresh.scale_ft_per_px());
        assert_eq!(engine.area_sq_ft(), fresh.area_sq_ft());
        assert_eq!(engine.scale_consistency_percent(), None);
        assert_eq!(engine.active_vertex(), None);
    }
}
