//! CountingPipeline for combining a tracker with line counting.

use thiserror::Error;
use tracing::{debug, trace};

use super::TrackSource;
use crate::counter::{CrossingEvent, CrossingStateMachine, GateConfig, Occupancy};
use crate::error::GateError;

/// Frame-loop settings for a [`CountingPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Only every `frame_stride`-th frame is processed.
    pub frame_stride: u64,
    /// Boxes with a different known class are ignored. `None` keeps all.
    pub subject_class: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_stride: 3,
            subject_class: Some(0),
        }
    }
}

/// Failure while processing a frame.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("track source failed")]
    Source(#[source] E),
}

/// Result of one processed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// 1-based index of the frame among all frames offered to the pipeline
    pub frame_index: u64,
    /// Classifications made in this frame
    pub events: Vec<CrossingEvent>,
    /// Counters after this frame
    pub occupancy: Occupancy,
}

/// Bundles any [`TrackSource`] with a [`CrossingStateMachine`].
pub struct CountingPipeline<S: TrackSource> {
    source: S,
    counter: CrossingStateMachine,
    config: PipelineConfig,
    frame_index: u64,
}

impl<S: TrackSource> CountingPipeline<S> {
    /// Create a new counting pipeline.
    pub fn new(source: S, gate: GateConfig, config: PipelineConfig) -> Result<Self, GateError> {
        if config.frame_stride == 0 {
            return Err(GateError::InvalidStride);
        }
        Ok(Self::from_parts(source, gate, config))
    }

    /// Create a new counting pipeline with default gate and frame settings.
    pub fn with_default_config(source: S) -> Self {
        Self::from_parts(source, GateConfig::default(), PipelineConfig::default())
    }

    /// Caller guarantees `config.frame_stride > 0`.
    fn from_parts(source: S, gate: GateConfig, config: PipelineConfig) -> Self {
        Self {
            source,
            counter: CrossingStateMachine::new(gate),
            config,
            frame_index: 0,
        }
    }

    /// Offer one frame to the pipeline.
    ///
    /// Returns `Ok(None)` for frames skipped by the stride; the source is not
    /// invoked for those.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Option<FrameReport>, PipelineError<S::Error>> {
        self.frame_index += 1;
        if self.frame_index % self.config.frame_stride != 0 {
            trace!(frame = self.frame_index, "frame skipped");
            return Ok(None);
        }

        let tracks = self
            .source
            .tracks(input, width, height)
            .map_err(PipelineError::Source)?;

        let mut events = Vec::new();
        for track in tracks {
            if let (Some(wanted), Some(got)) = (self.config.subject_class, track.class_id) {
                if wanted != got {
                    debug!(
                        track_id = track.track_id,
                        class_id = got,
                        "ignoring track of foreign class"
                    );
                    continue;
                }
            }
            let obs = track.observation();
            events.extend(self.counter.observe(obs.track_id, obs.point));
        }

        Ok(Some(FrameReport {
            frame_index: self.frame_index,
            events,
            occupancy: self.counter.occupancy(),
        }))
    }

    /// Number of frames offered so far, processed or skipped.
    pub fn frames_seen(&self) -> u64 {
        self.frame_index
    }

    /// Get a reference to the underlying track source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying track source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying state machine.
    pub fn counter(&self) -> &CrossingStateMachine {
        &self.counter
    }
}
