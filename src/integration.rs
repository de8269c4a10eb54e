//! Integration module for connecting detector + tracker backends with line
//! counting.
//!
//! Detection and tracking stay outside this crate. This module provides the
//! trait a backend implements and a pipeline that drives the frame loop.

mod builder;
mod detector;
mod pipeline;

pub use builder::ObservationBuilder;
pub use detector::{IntoObservations, TrackSource, TrackedBox};
pub use pipeline::{CountingPipeline, FrameReport, PipelineConfig, PipelineError};
