// src/engine_lib/scene_logic.rs
use std::f32::consts::PI;

use glam::Vec3;

use crate::config::SimulationConfig;
use crate::engine_lib::camera::Camera;
use crate::engine_lib::controller::InputSource;
use crate::engine_lib::portal::{Portal, PortalRegistry};
use crate::engine_lib::scene_types::{PortalId, Scene, SceneObject};
use crate::engine_lib::transform::RotationOrder;
use crate::rendering_lib::{RenderSettings, UniformSink};

/// Distance the observer is pushed past the exit plane so the target portal
/// does not immediately catch it again.
pub const EXIT_OFFSET: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossingCheck {
    OutOfBounds,
    /// Inside the slab but not moving through it in the triggering direction.
    WrongDirection,
    /// In bounds and moving through, but the portal has no target.
    Unlinked,
    Traverse {
        target: PortalId,
        /// Observer offset in portal-local axes, shifted into `[0, size]`.
        local_offset: Vec3,
    },
}

/// A transfer that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalCrossing {
    pub source: PortalId,
    pub target: PortalId,
    /// Entry point as a 0..1 fraction of the source aperture (X, Z).
    pub aperture_fraction: Vec3,
}

/// Decides whether the camera just passed through `portal`.
///
/// The trigger is one-directional: only an observer that is on the local -Y
/// side of the plane and still moving towards -Y is carried through.
pub fn check_portal_crossing(camera: &Camera, portal: &Portal) -> CrossingCheck {
    let portal_rotation = portal.rotation_matrix(RotationOrder::XYZ);
    let size = portal.size();

    let local_offset = portal_rotation * (portal.position() - camera.position()) + size / 2.0;

    if !portal.is_point_in_bounds(local_offset) {
        return CrossingCheck::OutOfBounds;
    }

    let local_velocity = portal_rotation.inverse() * camera.absolute_velocity();

    if !(local_velocity.dot(Vec3::Y) < 0.0 && local_offset.dot(Vec3::Y) > 0.0) {
        return CrossingCheck::WrongDirection;
    }

    match portal.target() {
        Some(target) => CrossingCheck::Traverse { target, local_offset },
        None => CrossingCheck::Unlinked,
    }
}

/// Entry point as a fraction of the source aperture, mirrored along the
/// source's local "right" axis so it lines up with the exit aperture.
pub fn mirrored_aperture_fraction(source: &Portal, local_offset: Vec3) -> Vec3 {
    let size = source.size();
    let mut fraction = Vec3::new(local_offset.x / size.x, 0.0, local_offset.z / size.z);

    // The mask keeps its sign. A source whose local right axis points along
    // -X maps `f` to `3f - 1`, which can land outside the target aperture.
    let mut mirror_mask = source.rotation_matrix(RotationOrder::XYZ) * Vec3::X;
    mirror_mask.z = mirror_mask.y;
    mirror_mask.y = 0.0;

    let inverted = Vec3::ONE - fraction;
    fraction += (inverted - fraction) * mirror_mask;
    fraction
}

/// Moves the camera from `source` to the matching spot on `target` and turns
/// it to face out of the exit. Velocity is left in the camera's own frame.
pub fn remap_through_portal(camera: &mut Camera, source: &Portal, target: &Portal, local_offset: Vec3) -> Vec3 {
    let source_rotation = source.rotation_matrix(RotationOrder::XYZ);
    let fraction = mirrored_aperture_fraction(source, local_offset);

    let target_size = target.size();
    let target_offset = fraction * target_size - target_size / 2.0;

    let portal_space_rotation = source_rotation * camera.transform().rotation;

    let target_rotation = target.rotation_matrix(RotationOrder::XYZ);
    let target_rotation_inv = target_rotation.inverse();
    let world_offset = target_rotation_inv * target_offset;
    let exit_push = target_rotation * Vec3::Y * EXIT_OFFSET;

    let transform = camera.transform_mut();
    transform.position = target.position() - world_offset + exit_push;
    transform.rotation = target_rotation_inv * portal_space_rotation + Vec3::Y * PI;

    fraction
}

/// Tests every portal in registration order against the camera's current
/// state and applies each transfer immediately. Portals whose apertures
/// overlap are resolved by that order alone.
pub fn apply_portal_crossings(camera: &mut Camera, portals: &PortalRegistry) -> Vec<PortalCrossing> {
    let mut crossings = Vec::new();

    for (source_id, source) in portals.iter() {
        match check_portal_crossing(camera, source) {
            CrossingCheck::Traverse { target: target_id, local_offset } => {
                let Some(target) = portals.get(target_id) else {
                    log::warn!("Portal '{}' targets missing portal {}", source.name(), target_id);
                    continue;
                };

                let aperture_fraction = remap_through_portal(camera, source, target, local_offset);
                log::debug!(
                    "Traversed '{}' -> '{}' at {:.3}, now at {}",
                    source.name(),
                    target.name(),
                    aperture_fraction,
                    camera.transform()
                );

                crossings.push(PortalCrossing {
                    source: source_id,
                    target: target_id,
                    aperture_fraction,
                });
            }
            CrossingCheck::Unlinked => {
                log::trace!("Portal '{}' crossed but has no target", source.name());
            }
            CrossingCheck::OutOfBounds | CrossingCheck::WrongDirection => {}
        }
    }

    crossings
}

/// One simulation tick: input, integration, portal transfers, uniform upload.
pub fn step_scene<I, S>(
    scene: &mut Scene,
    input: &I,
    dt: f32,
    config: &SimulationConfig,
    render: &RenderSettings,
    sink: &mut S,
) -> Vec<PortalCrossing>
where
    I: InputSource + ?Sized,
    S: UniformSink,
{
    scene.camera.process_input(input, dt, config);
    let crossings = scene.camera.process_physics(&scene.portals, config);

    scene.camera.upload_transform(sink);
    render.upload(sink);

    crossings
}
