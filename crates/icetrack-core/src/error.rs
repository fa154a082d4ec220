//! Error types for configuration and host-field validation.
use thiserror::Error;

/// Invalid tracker configuration, reported at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("frequency_seeding must be positive and finite, got {0}")]
    InvalidFrequency(f64),

    #[error("density_seeding must lie in (0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("unknown tracking method {0:?} (expected \"simple\" or \"3d\")")]
    UnknownTrackingMethod(String),

    #[error("failed to parse tracking configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host grids or coordinates that do not describe a usable grid.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("{name} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("coordinate vector {axis} needs at least 2 nodes, got {len}")]
    TooFewNodes { axis: &'static str, len: usize },

    #[error("grid spacing must be positive and shared by both axes, got {0}")]
    InvalidSpacing(f64),
}

/// Any failure surfaced by the tracker.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),
}
