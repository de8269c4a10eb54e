//! Per-track crossing classification and live counters.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::counter::config::GateConfig;
use crate::counter::crossing_status::CrossingStatus;
use crate::counter::point::Point;

/// Track identifier assigned by the external tracker.
pub type TrackId = u64;

/// One tracked subject's position in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub track_id: TrackId,
    pub point: Point,
}

impl Observation {
    #[inline]
    pub fn new(track_id: TrackId, point: Point) -> Self {
        Self { track_id, point }
    }
}

/// Emitted when a track receives its one and only classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingEvent {
    pub track_id: TrackId,
    /// Either `Entered` or `Exited`.
    pub status: CrossingStatus,
    /// Position that triggered the classification
    pub point: Point,
}

/// Snapshot of the live counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub entered: usize,
    pub exited: usize,
    /// `entered - exited`; negative when exits outnumber observed entries.
    pub inside: i64,
}

/// Write-once entry/exit classifier.
///
/// The first observation of a track near either line fixes its status for the
/// rest of the session. Entry wins when a point is near both lines. Tracks seen
/// near neither line stay unclassified and remain eligible later. Nothing is
/// ever evicted.
///
/// One instance serves one stream; observations must arrive in frame order.
#[derive(Debug, Clone)]
pub struct CrossingStateMachine {
    config: GateConfig,
    status_map: HashMap<TrackId, CrossingStatus>,
    entered_ids: HashSet<TrackId>,
    exited_ids: HashSet<TrackId>,
}

impl CrossingStateMachine {
    pub fn new(config: GateConfig) -> Self {
        info!(
            entry_start = %config.entry_line().start(),
            entry_end = %config.entry_line().end(),
            exit_start = %config.exit_line().start(),
            exit_end = %config.exit_line().end(),
            threshold = config.threshold(),
            "crossing state machine configured"
        );
        Self {
            config,
            status_map: HashMap::new(),
            entered_ids: HashSet::new(),
            exited_ids: HashSet::new(),
        }
    }

    /// Feed one observation.
    ///
    /// Returns the event if this observation classified the track, `None` if
    /// the track was already classified or is near neither line.
    pub fn observe(&mut self, track_id: TrackId, point: Point) -> Option<CrossingEvent> {
        if self.status_map.contains_key(&track_id) {
            return None;
        }

        let threshold = self.config.threshold();
        let status = if self.config.entry_line().is_near(point, threshold) {
            self.entered_ids.insert(track_id);
            CrossingStatus::Entered
        } else if self.config.exit_line().is_near(point, threshold) {
            self.exited_ids.insert(track_id);
            CrossingStatus::Exited
        } else {
            return None;
        };
        self.status_map.insert(track_id, status);

        debug!(
            track_id,
            status = status.as_str(),
            x = point.x,
            y = point.y,
            "track classified"
        );
        Some(CrossingEvent {
            track_id,
            status,
            point,
        })
    }

    /// Feed every observation of one frame, in order.
    pub fn observe_frame(&mut self, observations: &[Observation]) -> Vec<CrossingEvent> {
        observations
            .iter()
            .filter_map(|obs| self.observe(obs.track_id, obs.point))
            .collect()
    }

    /// Classification of `track_id`, `Unset` if never classified.
    pub fn status(&self, track_id: TrackId) -> CrossingStatus {
        self.status_map
            .get(&track_id)
            .copied()
            .unwrap_or_default()
    }

    #[inline]
    pub fn is_classified(&self, track_id: TrackId) -> bool {
        self.status_map.contains_key(&track_id)
    }

    #[inline]
    pub fn entered_count(&self) -> usize {
        self.entered_ids.len()
    }

    #[inline]
    pub fn exited_count(&self) -> usize {
        self.exited_ids.len()
    }

    /// Entered minus exited. May be negative.
    #[inline]
    pub fn inside_count(&self) -> i64 {
        self.entered_count() as i64 - self.exited_count() as i64
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            entered: self.entered_count(),
            exited: self.exited_count(),
            inside: self.inside_count(),
        }
    }

    pub fn entered_ids(&self) -> &HashSet<TrackId> {
        &self.entered_ids
    }

    pub fn exited_ids(&self) -> &HashSet<TrackId> {
        &self.exited_ids
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Entry along x = 0, exit along x = 20, both spanning y in [0, 10].
    fn machine() -> CrossingStateMachine {
        let config = GateConfig::from_points(((0, 0), (0, 10)), ((20, 0), (20, 10)), 2.0).unwrap();
        CrossingStateMachine::new(config)
    }

    #[test]
    fn test_counter_derivation() {
        let mut sm = machine();
        assert!(sm.observe(1, Point::new(1, 5)).is_some());
        assert!(sm.observe(2, Point::new(19, 5)).is_some());
        assert!(sm.observe(3, Point::new(10, 5)).is_none());

        assert_eq!(sm.entered_count(), 1);
        assert_eq!(sm.exited_count(), 1);
        assert_eq!(sm.inside_count(), 0);
        assert_eq!(sm.status(1), CrossingStatus::Entered);
        assert_eq!(sm.status(2), CrossingStatus::Exited);
        assert_eq!(sm.status(3), CrossingStatus::Unset);
        assert!(!sm.status(3).is_classified());
        assert!(!sm.is_classified(3));
    }

    #[test]
    fn test_negative_inside_count() {
        let mut sm = machine();
        sm.observe(4, Point::new(20, 3));
        assert_eq!(
            sm.occupancy(),
            Occupancy {
                entered: 0,
                exited: 1,
                inside: -1
            }
        );
    }

    #[test]
    fn test_classification_is_write_once() {
        let mut sm = machine();
        let event = sm.observe(7, Point::new(0, 0)).unwrap();
        assert_eq!(event.status, CrossingStatus::Entered);

        // Drifting onto the exit line later changes nothing.
        assert!(sm.observe(7, Point::new(20, 5)).is_none());
        assert!(sm.observe(7, Point::new(21, 9)).is_none());
        assert_eq!(sm.status(7), CrossingStatus::Entered);
        assert_eq!(sm.entered_count(), 1);
        assert_eq!(sm.exited_count(), 0);
        assert!(!sm.exited_ids().contains(&7));
    }

    #[test]
    fn test_exited_track_stays_exited() {
        let mut sm = machine();
        sm.observe(8, Point::new(20, 5));
        sm.observe(8, Point::new(0, 5));
        assert_eq!(sm.status(8), CrossingStatus::Exited);
        assert!(sm.entered_ids().is_empty());
    }

    #[test]
    fn test_entry_wins_tie() {
        // Overlapping lines: every point near one is near the other.
        let config = GateConfig::from_points(((0, 0), (0, 10)), ((1, 0), (1, 10)), 2.0).unwrap();
        let mut sm = CrossingStateMachine::new(config);
        let event = sm.observe(9, Point::new(1, 5)).unwrap();
        assert_eq!(event.status, CrossingStatus::Entered);
        assert_eq!(sm.exited_count(), 0);
    }

    #[test]
    fn test_unclassified_track_stays_eligible() {
        let mut sm = machine();
        assert!(sm.observe(5, Point::new(10, 5)).is_none());
        assert!(sm.observe(5, Point::new(11, 5)).is_none());
        let event = sm.observe(5, Point::new(18, 5)).unwrap();
        assert_eq!(event.status, CrossingStatus::Exited);
        assert_eq!(event.point, Point::new(18, 5));
    }

    #[test]
    fn test_observe_frame_in_order() {
        let mut sm = machine();
        let frame = [
            Observation::new(1, Point::new(0, 5)),
            Observation::new(2, Point::new(10, 5)),
            Observation::new(3, Point::new(20, 5)),
            Observation::new(1, Point::new(20, 5)),
        ];
        let events = sm.observe_frame(&frame);
        let ids: Vec<_> = events.iter().map(|e| (e.track_id, e.status)).collect();
        assert_eq!(
            ids,
            vec![(1, CrossingStatus::Entered), (3, CrossingStatus::Exited)]
        );
        assert_eq!(sm.inside_count(), 0);
    }

    #[test]
    fn test_sets_are_disjoint() {
        let mut sm = machine();
        for frame in 0..5 {
            for id in 0..10u64 {
                let x = if (id + frame) % 2 == 0 { 0 } else { 20 };
                sm.observe(id, Point::new(x, 5));
            }
        }
        assert_eq!(sm.entered_count() + sm.exited_count(), 10);
        assert!(sm.entered_ids().is_disjoint(sm.exited_ids()));
    }
}
