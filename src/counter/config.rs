//! Gate configuration: the two counting lines and the shared threshold.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::counter::line::LineSegment;
use crate::counter::point::Point;
use crate::error::GateError;

const DEFAULT_ENTRY_LINE: (Point, Point) = (Point::new(650, 350), Point::new(950, 450));
const DEFAULT_EXIT_LINE: (Point, Point) = (Point::new(623, 366), Point::new(911, 465));
const DEFAULT_THRESHOLD: f64 = 15.0;

/// Configuration for a [`CrossingStateMachine`](crate::CrossingStateMachine).
///
/// Immutable once built. Both lines are non-degenerate and the threshold is
/// finite and non-negative.
///
/// TOML form:
///
/// ```toml
/// threshold = 15
///
/// [entry_line]
/// start = [650, 350]
/// end = [950, 450]
///
/// [exit_line]
/// start = [623, 366]
/// end = [911, 465]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGateConfig")]
pub struct GateConfig {
    entry_line: LineSegment,
    exit_line: LineSegment,
    threshold: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGateConfig {
    entry_line: LineSegment,
    exit_line: LineSegment,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl TryFrom<RawGateConfig> for GateConfig {
    type Error = GateError;

    fn try_from(raw: RawGateConfig) -> Result<Self, Self::Error> {
        Self::new(raw.entry_line, raw.exit_line, raw.threshold)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            entry_line: LineSegment::new_unchecked(DEFAULT_ENTRY_LINE.0, DEFAULT_ENTRY_LINE.1),
            exit_line: LineSegment::new_unchecked(DEFAULT_EXIT_LINE.0, DEFAULT_EXIT_LINE.1),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl GateConfig {
    pub fn new(
        entry_line: LineSegment,
        exit_line: LineSegment,
        threshold: f64,
    ) -> Result<Self, GateError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(GateError::InvalidThreshold(threshold));
        }
        Ok(Self {
            entry_line,
            exit_line,
            threshold,
        })
    }

    /// Build a config from raw endpoint pairs, validating both lines.
    pub fn from_points(
        entry: ((i32, i32), (i32, i32)),
        exit: ((i32, i32), (i32, i32)),
        threshold: f64,
    ) -> Result<Self, GateError> {
        Self::new(
            LineSegment::new(entry.0, entry.1)?,
            LineSegment::new(exit.0, exit.1)?,
            threshold,
        )
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GateError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GateError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| GateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            entry_start = %config.entry_line.start(),
            entry_end = %config.entry_line.end(),
            exit_start = %config.exit_line.start(),
            exit_end = %config.exit_line.end(),
            threshold = config.threshold,
            "loaded gate config"
        );
        Ok(config)
    }

    #[inline]
    pub fn entry_line(&self) -> &LineSegment {
        &self.entry_line
    }

    #[inline]
    pub fn exit_line(&self) -> &LineSegment {
        &self.exit_line
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
