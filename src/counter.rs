mod config;
mod crossing_status;
mod line;
mod point;
mod state_machine;

pub use config::GateConfig;
pub use crossing_status::CrossingStatus;
pub use line::{LineSegment, is_near};
pub use point::{BoundingBox, Point};
pub use state_machine::{CrossingEvent, CrossingStateMachine, Observation, Occupancy, TrackId};
