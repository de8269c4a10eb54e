//! Error types for gate configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::counter::Point;

#[derive(Debug, Error)]
pub enum GateError {
    /// A line whose start and end coincide has no direction to measure against.
    #[error("degenerate line: start and end are both {start}")]
    InvalidGeometry { start: Point },

    #[error("line threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    #[error("frame stride must be at least 1")]
    InvalidStride,

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
