// src/lib.rs

pub mod config;
pub mod demo_scene;
pub mod engine_lib;
pub mod rendering_lib;

pub use config::{ConfigError, EngineConfig, SimulationConfig};
pub use engine_lib::{Camera, Portal, PortalRegistry, Scene, SceneError, Transform};
