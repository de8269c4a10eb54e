//! Entry/exit line counting for tracked subjects.
//!
//! A [`CrossingStateMachine`] consumes `(track id, point)` observations produced
//! by an external detector + tracker and classifies each track exactly once as
//! entered or exited, depending on which configured line it is first seen near.
//! The [`integration`] module provides the seams for plugging a tracker in.

pub mod counter;
pub mod error;
pub mod integration;

pub use counter::{
    BoundingBox, CrossingEvent, CrossingStateMachine, CrossingStatus, GateConfig, LineSegment,
    Observation, Occupancy, Point, TrackId, is_near,
};
pub use error::GateError;
pub use integration::{
    CountingPipeline, FrameReport, IntoObservations, ObservationBuilder, PipelineConfig,
    PipelineError, TrackSource, TrackedBox,
};
