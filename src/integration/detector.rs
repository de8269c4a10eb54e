//! Trait for detector + tracker backends.

use crate::counter::{BoundingBox, Observation, TrackId};

/// A tracked detection as reported by the external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedBox {
    /// Tracker-assigned identity, stable while the subject stays visible
    pub track_id: TrackId,
    pub bbox: BoundingBox,
    /// Detector class, if the backend reports one
    pub class_id: Option<usize>,
}

impl TrackedBox {
    pub fn new(track_id: TrackId, bbox: BoundingBox) -> Self {
        Self {
            track_id,
            bbox,
            class_id: None,
        }
    }

    pub fn with_class(mut self, class_id: usize) -> Self {
        self.class_id = Some(class_id);
        self
    }

    /// Observation at the box centroid.
    #[inline]
    pub fn observation(&self) -> Observation {
        Observation::new(self.track_id, self.bbox.center())
    }
}

/// Trait for detection + tracking backends.
///
/// Implement this trait to feed any tracker into a
/// [`CountingPipeline`](super::CountingPipeline).
///
/// # Example
///
/// ```ignore
/// use gateguard::{TrackSource, TrackedBox};
///
/// struct MyTracker {
///     // Your model and tracker here
/// }
///
/// impl TrackSource for MyTracker {
///     type Error = std::io::Error;
///
///     fn tracks(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<TrackedBox>, Self::Error> {
///         // Run inference + association and return tracked boxes
///         Ok(vec![])
///     }
/// }
/// ```
pub trait TrackSource {
    /// Error type for detection or tracking failures.
    type Error;

    /// Run detection and tracking on raw image data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn tracks(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedBox>, Self::Error>;
}

/// Helper trait for converting tracker outputs into observations.
pub trait IntoObservations {
    fn into_observations(self) -> Vec<Observation>;
}

impl IntoObservations for Vec<Observation> {
    fn into_observations(self) -> Vec<Observation> {
        self
    }
}

impl IntoObservations for Vec<TrackedBox> {
    fn into_observations(self) -> Vec<Observation> {
        self.iter().map(TrackedBox::observation).collect()
    }
}
