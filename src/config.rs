// src/config.rs
//! Tunables for the simulation and renderer switches, loadable from JSON.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rendering_lib::RenderSettings;

/// Observer movement parameters. Every field falls back to its default when
/// missing from the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Acceleration per second of held movement input.
    pub speed: f32,
    pub mouse_sensitivity: Vec2,
    /// Relative velocity is divided by this every tick.
    pub damping: f32,
    /// Velocities shorter than this snap to zero after damping.
    pub velocity_snap: f32,
    /// Velocities longer than this keep `moved` set without input.
    pub moved_threshold: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed: 0.3,
            mouse_sensitivity: Vec2::new(0.6, 0.6),
            damping: 1.1,
            velocity_snap: 1e-3,
            moved_threshold: 1e-5,
        }
    }
}

impl SimulationConfig {
    /// Rejects values that would make integration diverge or produce NaNs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("speed", self.speed),
            ("mouse_sensitivity.x", self.mouse_sensitivity.x),
            ("mouse_sensitivity.y", self.mouse_sensitivity.y),
            ("damping", self.damping),
            ("velocity_snap", self.velocity_snap),
            ("moved_threshold", self.moved_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, value, reason: "must be finite" });
            }
        }

        if self.damping <= 1.0 {
            return Err(ConfigError::Invalid { field: "damping", value: self.damping, reason: "must be greater than 1" });
        }
        for (field, value) in [("speed", self.speed), ("velocity_snap", self.velocity_snap), ("moved_threshold", self.moved_threshold)] {
            if value < 0.0 {
                return Err(ConfigError::Invalid { field, value, reason: "must not be negative" });
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, value: f32, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "malformed config: {e}"),
            ConfigError::Invalid { field, value, reason } => {
                write!(f, "simulation.{field} = {value} {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub render: RenderSettings,
}

impl EngineConfig {
    /// Parses config from JSON and validates the simulation values.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.simulation.validate()?;
        Ok(config)
    }
}
