//! icetrack: Lagrangian tracer particles advected through gridded ice flow.
//!
//! A host ice-flow model hands over its 2D grids once per timestep; the
//! tracker seeds particles, samples the grids at every particle, advects
//! them with either the depth-reduced or the full 3-D vertical model, and
//! scatters surface particle weights back onto the grid.
pub mod diagnostics;
pub mod error;
pub mod fields;
pub mod grid;
pub mod kinematics;
pub mod operators;
pub mod sampling;
pub mod tracking;

pub use diagnostics::TrackingSummary;
pub use error::{ConfigError, FieldError, TrackingError};
pub use fields::HostFields;
pub use grid::GridGeometry;
pub use tracking::outputs::StepReport;
pub use tracking::params::{TrackingConfig, TrackingMethod};
pub use tracking::run::ParticleTracker;
pub use tracking::state::{Particle, ParticleStore};
