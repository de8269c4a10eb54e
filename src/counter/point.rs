use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A position in frame pixel space.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub(crate) fn to_vector(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer bounding box in TLBR format, as reported by a detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Create a box from TLBR corners (x1, y1, x2, y2).
    #[inline]
    pub const fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a box from top-left corner and dimensions (TLWH format).
    ///
    /// The far corner saturates at the `i32` range.
    #[inline]
    pub const fn from_tlwh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::from_tlbr(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Create a box from floating-point TLBR corners.
    ///
    /// Coordinates are truncated toward zero, the same way tensor outputs are
    /// cast to integer pixels before counting.
    #[inline]
    pub fn from_tlbr_f32(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::from_tlbr(x1 as i32, y1 as i32, x2 as i32, y2 as i32)
    }

    #[inline]
    pub fn width(&self) -> i64 {
        i64::from(self.x2) - i64::from(self.x1)
    }

    #[inline]
    pub fn height(&self) -> i64 {
        i64::from(self.y2) - i64::from(self.y1)
    }

    /// Centroid of the box, rounded down on both axes.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(midpoint(self.x1, self.x2), midpoint(self.y1, self.y2))
    }
}

/// Floor of `(a + b) / 2`, computed without overflow.
#[inline]
fn midpoint(a: i32, b: i32) -> i32 {
    // The floored mean of two i32 values always lies between them.
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}
