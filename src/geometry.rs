//! Pure geometry helpers for the measurement tool.
//!
//! Everything here is a plain function over `Point`s, extracted for
//! testability: the engine recomputes its derived values from scratch
//! through these instead of carrying cached fields that can go stale.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint of the segment from this point to `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Angle of the segment from this point to `other`, in degrees.
    /// Used to rotate wall labels along their wall.
    pub fn angle_to_deg(&self, other: &Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

/// Snap `candidate` onto the nearest axis through `reference`.
///
/// Whichever displacement component is larger wins: a mostly-horizontal
/// move keeps the candidate's x and takes the reference's y, a
/// mostly-vertical move keeps y and takes the reference's x. Ties go
/// horizontal.
pub fn snap_to_nearest_axis(reference: Point, candidate: Point) -> Point {
    let dx = candidate.x - reference.x;
    let dy = candidate.y - reference.y;
    if dx.abs() >= dy.abs() {
        Point::new(candidate.x, reference.y)
    } else {
        Point::new(reference.x, candidate.y)
    }
}

/// Area in square pixels of the polygon described by `vertices`,
/// treated as cyclic, via the shoelace formula. Returns 0 for fewer
/// than 3 vertices.
pub fn polygon_area_px(vertices: &[Point]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    (sum / 2.0).abs()
}

/// Median of a set of values. Returns 0 for an empty slice.
pub fn median(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
