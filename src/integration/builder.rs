//! Builder for creating Observation objects from various box formats.

use crate::counter::{BoundingBox, Observation, Point, TrackId};

/// Builder for creating [`Observation`]s from various input formats.
///
/// Box inputs are reduced to their centroid; the last geometry setter wins.
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    track_id: TrackId,
    point: Point,
}

impl ObservationBuilder {
    /// Create a new observation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tracker identity.
    pub fn track_id(mut self, track_id: TrackId) -> Self {
        self.track_id = track_id;
        self
    }

    /// Set the observed point directly.
    pub fn point(mut self, x: i32, y: i32) -> Self {
        self.point = Point::new(x, y);
        self
    }

    /// Set from a bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.point = BoundingBox::from_tlbr(x1, y1, x2, y2).center();
        self
    }

    /// Set from a bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.point = BoundingBox::from_tlwh(x, y, w, h).center();
        self
    }

    /// Set from a floating-point TLBR box, as most trackers emit.
    pub fn tlbr_f32(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.point = BoundingBox::from_tlbr_f32(x1, y1, x2, y2).center();
        self
    }

    /// Build the final `Observation`.
    pub fn build(self) -> Observation {
        Observation::new(self.track_id, self.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_builder() {
        let obs = ObservationBuilder::new()
            .track_id(42)
            .tlbr(10, 20, 50, 80)
            .build();
        assert_eq!(obs.track_id, 42);
        assert_eq!(obs.point, Point::new(30, 50));
    }

    #[test]
    fn test_tlwh_and_tlbr_agree() {
        let a = ObservationBuilder::new().tlwh(10, 20, 40, 60).build();
        let b = ObservationBuilder::new().tlbr(10, 20, 50, 80).build();
        assert_eq!(a.point, b.point);
    }

    #[test]
    fn test_f32_box() {
        let obs = ObservationBuilder::new()
            .track_id(3)
            .tlbr_f32(10.7, 20.2, 21.9, 31.5)
            .build();
        // Truncated to (10, 20, 21, 31) before taking the centroid.
        assert_eq!(obs.point, Point::new(15, 25));
    }
}
