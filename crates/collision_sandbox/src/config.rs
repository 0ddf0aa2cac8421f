//! Sandbox configuration
//!
//! Loaded from the `.toml` or `.ron` file named on the command line. Every
//! field has a default, so the file only lists what it overrides.

use collision_engine::config::{CollisionConfig, Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Scenario settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Number of simulation ticks to run
    pub ticks: u32,

    /// Seconds per tick
    pub timestep: f32,

    /// Log statistics every this many ticks (0 disables)
    pub report_interval: u32,

    /// Scenario layout
    pub scenario: ScenarioConfig,

    /// Collision engine tunables
    pub collision: CollisionConfig,
}

/// Arena layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Seed for spawn positions and velocities
    pub seed: u64,

    /// Number of bouncing balls
    pub ball_count: u32,

    /// Half the side length of the square arena
    pub arena_half_size: f32,

    /// Ball radius
    pub ball_radius: f32,

    /// Maximum initial ball speed
    pub max_speed: f32,

    /// Ball restitution
    pub bounciness: f32,

    /// Radius of the trigger zone at the arena center
    pub zone_radius: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            timestep: 1.0 / 60.0,
            report_interval: 120,
            scenario: ScenarioConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            ball_count: 40,
            arena_half_size: 20.0,
            ball_radius: 0.75,
            max_speed: 6.0,
            bounciness: 0.8,
            zone_radius: 4.0,
        }
    }
}

impl Config for SandboxConfig {}

impl SandboxConfig {
    /// Check values the scenario depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "timestep",
                reason: format!("must be a finite value > 0, got {}", self.timestep),
            });
        }
        let scenario = &self.scenario;
        let fits = scenario.arena_half_size.is_finite() && scenario.arena_half_size > scenario.ball_radius * 2.0;
        if !fits {
            return Err(ConfigError::Invalid {
                field: "scenario.arena_half_size",
                reason: format!(
                    "arena of half size {} cannot hold balls of radius {}",
                    scenario.arena_half_size, scenario.ball_radius
                ),
            });
        }
        if !scenario.max_speed.is_finite() || scenario.max_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "scenario.max_speed",
                reason: format!("must be a finite value >= 0, got {}", scenario.max_speed),
            });
        }
        self.collision.validate()
    }
}
