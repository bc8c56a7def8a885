// src/engine_lib/scene_types.rs
use std::fmt;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::engine_lib::camera::Camera;
use crate::engine_lib::portal::{Portal, PortalRegistry};
use crate::engine_lib::transform::{RotationOrder, Transform};

/// Handle into a [`PortalRegistry`]; ids are handed out in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortalId(pub usize);

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything placed in the scene. Each implementor owns exactly one [`Transform`].
pub trait SceneObject {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    fn position(&self) -> Vec3 {
        self.transform().position
    }

    fn rotation_matrix(&self, order: RotationOrder) -> Mat3 {
        self.transform().rotation_matrix(order)
    }
}

/// Invalid scene configuration. All of these are detected while the scene is
/// built; the per-tick path never produces them.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    DegeneratePortal { name: String, scale: Vec3 },
    SelfConnection { portal: PortalId },
    AlreadyConnected { portal: PortalId, target: PortalId },
    UnknownPortal(PortalId),
    UnknownPortalName(String),
    DuplicatePortalName(String),
    SingularScale { scale: Vec3 },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DegeneratePortal { name, scale } => {
                write!(f, "portal '{name}' has a zero-area aperture (scale {scale})")
            }
            SceneError::SelfConnection { portal } => {
                write!(f, "portal {portal} cannot target itself")
            }
            SceneError::AlreadyConnected { portal, target } => {
                write!(f, "portal {portal} is already connected to {target}")
            }
            SceneError::UnknownPortal(id) => write!(f, "no portal with id {id}"),
            SceneError::UnknownPortalName(name) => write!(f, "no portal named '{name}'"),
            SceneError::DuplicatePortalName(name) => {
                write!(f, "portal name '{name}' is used more than once")
            }
            SceneError::SingularScale { scale } => {
                write!(f, "transform with scale {scale} has no local frame")
            }
        }
    }
}

impl std::error::Error for SceneError {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortalDescription {
    pub name: String,
    pub transform: Transform,
}

/// Declarative scene layout: portals by name plus the pairs to link.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default = "default_camera_transform")]
    pub camera: Transform,
    pub portals: Vec<PortalDescription>,
    #[serde(default)]
    pub links: Vec<(String, String)>,
}

pub fn default_camera_transform() -> Transform {
    Transform::from_position(Vec3::new(0.0, 1.0, 3.0))
}

impl SceneDescription {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Simulation state for one observer and the portals it can pass through.
#[derive(Debug)]
pub struct Scene {
    pub portals: PortalRegistry,
    pub camera: Camera,
}

impl Scene {
    pub fn new(portals: PortalRegistry, camera: Camera) -> Self {
        Self { portals, camera }
    }

    /// Validates and builds a scene. Portals are registered in description
    /// order, which is also the order they are tested in every tick.
    pub fn from_description(description: &SceneDescription, camera_speed: f32) -> Result<Self, SceneError> {
        let mut portals = PortalRegistry::new();

        for portal in &description.portals {
            if portals.find_by_name(&portal.name).is_some() {
                return Err(SceneError::DuplicatePortalName(portal.name.clone()));
            }
            portals.insert(Portal::new(portal.name.clone(), portal.transform)?);
        }

        for (a, b) in &description.links {
            let a_id = portals.find_by_name(a).ok_or_else(|| SceneError::UnknownPortalName(a.clone()))?;
            let b_id = portals.find_by_name(b).ok_or_else(|| SceneError::UnknownPortalName(b.clone()))?;
            portals.connect(a_id, b_id)?;
        }

        log::info!(
            "Scene built: {} portals, {} links, camera at {}",
            portals.len(),
            description.links.len(),
            description.camera.position
        );

        Ok(Self::new(portals, Camera::new(description.camera, camera_speed)))
    }
}
