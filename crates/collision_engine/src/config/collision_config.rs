//! Tunables for the collision engine

use super::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Collision engine configuration
///
/// All fields have defaults, so a config file only needs to list the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Side length of a broad-phase grid cell in world units
    pub cell_size: f32,

    /// Radius substituted for shapes without one in mixed-shape fallback tests
    pub default_radius: f32,

    /// Log per-tick statistics at debug level
    pub debug_stats: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: 4.0,
            default_radius: 0.5,
            debug_stats: false,
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Builder pattern: Set grid cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Check that every value is usable by the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: format!("must be a finite value > 0, got {}", self.cell_size),
            });
        }
        if !self.default_radius.is_finite() || self.default_radius <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "default_radius",
                reason: format!("must be a finite value > 0, got {}", self.default_radius),
            });
        }
        Ok(())
    }
}
