// src/engine_lib/mod.rs
pub mod transform;
pub mod scene_types;
pub mod portal;
pub mod camera;
pub mod controller;
pub mod scene_logic;

pub use transform::{Axis, RotationOrder, Transform};
pub use scene_types::{PortalDescription, PortalId, Scene, SceneDescription, SceneError, SceneObject};
pub use portal::{Portal, PortalRegistry, PORTAL_THICKNESS};
pub use camera::Camera;
pub use controller::{Controls, InputSource, KeyboardState};
pub use scene_logic::{step_scene, CrossingCheck, PortalCrossing, EXIT_OFFSET};
