// src/demo_scene.rs

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::engine_lib::scene_types::{default_camera_transform, PortalDescription, SceneDescription};
use crate::engine_lib::transform::Transform;

pub const FLOOR_PORTAL: &str = "floor";
pub const CEILING_PORTAL: &str = "ceiling";
pub const WEST_PORTAL: &str = "west";
pub const EAST_PORTAL: &str = "east";

fn portal(name: &str, position: Vec3, rotation: Vec3, scale: Vec3) -> PortalDescription {
    PortalDescription {
        name: name.to_string(),
        transform: Transform::new(position, rotation, scale),
    }
}

/// Two linked pairs: a horizontal floor/ceiling pair with the ceiling flipped
/// upside down, and a pair of upright doorways facing each other.
pub fn create_demo_scene() -> SceneDescription {
    let pad_size = Vec3::new(2.0, 1.0, 2.0);
    let door_size = Vec3::new(2.0, 1.0, 3.0);

    SceneDescription {
        camera: default_camera_transform(),
        portals: vec![
            portal(FLOOR_PORTAL, Vec3::new(0.0, -1.0, -4.0), Vec3::ZERO, pad_size),
            portal(CEILING_PORTAL, Vec3::new(12.0, 5.0, -4.0), Vec3::new(0.0, 0.0, PI), pad_size),
            portal(WEST_PORTAL, Vec3::new(-5.0, 1.0, 0.0), Vec3::new(FRAC_PI_2, 0.0, 0.0), door_size),
            portal(EAST_PORTAL, Vec3::new(5.0, 1.0, 0.0), Vec3::new(FRAC_PI_2, 0.0, PI), door_size),
        ],
        links: vec![
            (FLOOR_PORTAL.to_string(), CEILING_PORTAL.to_string()),
            (WEST_PORTAL.to_string(), EAST_PORTAL.to_string()),
        ],
    }
}
