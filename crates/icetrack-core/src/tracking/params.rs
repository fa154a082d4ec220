/// Particle tracking configuration.
///
/// Three settings, fixed for the lifetime of a tracker:
/// - `tracking_method`: vertical motion model, `"simple"` or `"3d"`
/// - `frequency_seeding`: time between seeding events [yr]
/// - `density_seeding`: fraction of grid nodes seeded along each axis
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_DENSITY_SEEDING, DEFAULT_FREQUENCY_SEEDING};
use crate::error::ConfigError;

/// Vertical motion model used by the advection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingMethod {
    /// Relative height rescaled by surface mass balance; elevation derived.
    #[serde(rename = "simple")]
    Simple,
    /// Elevation integrated with reconstructed vertical velocity.
    #[default]
    #[serde(rename = "3d")]
    ThreeD,
}

impl TrackingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackingMethod::Simple => "simple",
            TrackingMethod::ThreeD => "3d",
        }
    }

    /// Whether the step needs vertical velocity grids.
    pub fn needs_vertical_velocity(self) -> bool {
        matches!(self, TrackingMethod::ThreeD)
    }
}

impl fmt::Display for TrackingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TrackingMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(TrackingMethod::Simple),
            "3d" => Ok(TrackingMethod::ThreeD),
            other => Err(ConfigError::UnknownTrackingMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub tracking_method: TrackingMethod,
    pub frequency_seeding: f64,
    pub density_seeding: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tracking_method: TrackingMethod::default(),
            frequency_seeding: DEFAULT_FREQUENCY_SEEDING,
            density_seeding: DEFAULT_DENSITY_SEEDING,
        }
    }
}

impl TrackingConfig {
    /// Create a validated configuration.
    pub fn new(
        tracking_method: TrackingMethod,
        frequency_seeding: f64,
        density_seeding: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            tracking_method,
            frequency_seeding,
            density_seeding,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON parameter document.
    ///
    /// Missing keys take their defaults; unrelated keys are ignored so the
    /// host's full parameter file can be passed as is.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates:
    /// - `frequency_seeding` is positive and finite
    /// - `density_seeding` lies in (0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frequency_seeding.is_finite() && self.frequency_seeding > 0.0) {
            return Err(ConfigError::InvalidFrequency(self.frequency_seeding));
        }
        if !(self.density_seeding > 0.0 && self.density_seeding <= 1.0) {
            return Err(ConfigError::InvalidDensity(self.density_seeding));
        }
        Ok(())
    }

    /// Seed grid stride in nodes: `round(1 / density_seeding)`.
    pub fn seed_stride(&self) -> usize {
        ((1.0 / self.density_seeding).round() as usize).max(1)
    }
}
