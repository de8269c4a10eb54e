//! Line segments and the point-to-line proximity test.

use serde::{Deserialize, Serialize};

use crate::counter::point::Point;
use crate::error::GateError;

/// A counting line between two distinct points.
///
/// Deserialized from `{ start = [x, y], end = [x, y] }`; a degenerate segment
/// is rejected while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSegment")]
pub struct LineSegment {
    start: Point,
    end: Point,
}

#[derive(Deserialize)]
struct RawSegment {
    start: Point,
    end: Point,
}

impl TryFrom<RawSegment> for LineSegment {
    type Error = GateError;

    fn try_from(raw: RawSegment) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl LineSegment {
    /// Create a line segment, rejecting `start == end`.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Result<Self, GateError> {
        let (start, end) = (start.into(), end.into());
        if start == end {
            return Err(GateError::InvalidGeometry { start });
        }
        Ok(Self { start, end })
    }

    /// Caller guarantees `start != end`.
    pub(crate) const fn new_unchecked(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    /// Perpendicular distance from `point` to the infinite line through this
    /// segment.
    pub fn distance_to_line(&self, point: Point) -> f64 {
        let dir = self.end.to_vector() - self.start.to_vector();
        let rel = point.to_vector() - self.start.to_vector();
        // |dir| > 0 because the constructor rejects start == end.
        rel.perp(&dir).abs() / dir.norm()
    }

    /// Whether `point` lies within `threshold` pixels of this line.
    ///
    /// Axis-aligned lines are tested as bounded segments: the point must fall
    /// inside the segment's span along the line. Oblique lines are tested
    /// against the infinite line through both endpoints.
    pub fn is_near(&self, point: Point, threshold: f64) -> bool {
        let (s, e) = (self.start, self.end);
        if self.is_vertical() {
            (f64::from(point.x) - f64::from(s.x)).abs() <= threshold
                && (s.y.min(e.y)..=s.y.max(e.y)).contains(&point.y)
        } else if self.is_horizontal() {
            (f64::from(point.y) - f64::from(s.y)).abs() <= threshold
                && (s.x.min(e.x)..=s.x.max(e.x)).contains(&point.x)
        } else {
            self.distance_to_line(point) <= threshold
        }
    }
}

/// Free-function form of [`LineSegment::is_near`].
#[inline]
pub fn is_near(point: Point, line: &LineSegment, threshold: f64) -> bool {
    line.is_near(point, threshold)
}
