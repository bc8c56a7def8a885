// src/engine_lib/camera.rs

use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Vec3};

use crate::config::SimulationConfig;
use crate::engine_lib::controller::{Controls, InputSource};
use crate::engine_lib::portal::PortalRegistry;
use crate::engine_lib::scene_logic::{apply_portal_crossings, PortalCrossing};
use crate::engine_lib::scene_types::{default_camera_transform, SceneObject};
use crate::engine_lib::transform::{RotationOrder, Transform};
use crate::rendering_lib::uniforms::{UniformSink, CAMERA_MOVED, CAMERA_POSITION, CAMERA_ROTATION};

/// The observer. Velocity is kept in the observer's own rotated frame.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    pub relative_velocity: Vec3,
    pub speed: f32,
    moved: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(default_camera_transform(), SimulationConfig::default().speed)
    }
}

impl Camera {
    pub fn new(transform: Transform, speed: f32) -> Self {
        Self {
            transform,
            relative_velocity: Vec3::ZERO,
            speed,
            moved: false,
        }
    }

    /// Rotation from the observer's frame into world axes: yaw, then pitch, then roll.
    pub fn rotation_matrix(&self) -> Mat3 {
        self.transform.rotation_matrix(RotationOrder::YXZ)
    }

    pub fn absolute_velocity(&self) -> Vec3 {
        self.rotation_matrix().inverse() * self.relative_velocity
    }

    /// Whether the view changed this tick and the renderer should restart accumulation.
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn process_input<I: InputSource + ?Sized>(&mut self, input: &I, dt: f32, config: &SimulationConfig) {
        let controls = Controls::new(input, config.mouse_sensitivity);
        let step = self.speed * dt;

        self.relative_velocity += controls.move_relative_direction() * step;
        self.relative_velocity += self.rotation_matrix() * (controls.move_absolute_direction() * step);

        self.transform.rotation += controls.look_direction() * dt;
        self.transform.rotation.x = self.transform.rotation.x.clamp(-FRAC_PI_2, FRAC_PI_2);

        self.moved = controls.is_input_active() || self.relative_velocity.length() > config.moved_threshold;
    }

    /// Moves by the current velocity, then damps it.
    pub fn integrate(&mut self, config: &SimulationConfig) {
        self.transform.position += self.absolute_velocity();

        self.relative_velocity /= config.damping;
        if self.relative_velocity.length() < config.velocity_snap {
            self.relative_velocity = Vec3::ZERO;
        }
    }

    /// Integrates, then carries the camera through any portal it just crossed.
    pub fn process_physics(&mut self, portals: &PortalRegistry, config: &SimulationConfig) -> Vec<PortalCrossing> {
        self.integrate(config);
        apply_portal_crossings(self, portals)
    }

    pub fn upload_transform(&self, sink: &mut impl UniformSink) {
        sink.set_vec3(CAMERA_POSITION, self.transform.position);
        sink.set_vec3(CAMERA_ROTATION, self.transform.rotation);
        sink.set_int(CAMERA_MOVED, self.moved as i32);
    }
}

impl SceneObject for Camera {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_lib::controller::KeyboardState;
    use crate::rendering_lib::CameraUniform;
    use glam::Vec2;
    use winit::keyboard::KeyCode;

    fn camera_at_origin() -> Camera {
        Camera::new(Transform::IDENTITY, 0.3)
    }

    #[test]
    fn forward_input_accelerates_along_neg_z() {
        let config = SimulationConfig::default();
        let mut camera = camera_at_origin();
        let mut input = KeyboardState::new();
        input.press(KeyCode::KeyW);

        camera.process_input(&input, 0.5, &config);

        assert!(camera.relative_velocity.abs_diff_eq(Vec3::new(0.0, 0.0, -0.15), 1e-6));
        assert!(camera.moved());
    }

    #[test]
    fn yawed_camera_moves_in_its_own_frame() {
        let config = SimulationConfig::default();
        let mut camera = Camera::new(Transform::new(Vec3::ZERO, Vec3::new(0.0, FRAC_PI_2, 0.0), Vec3::ONE), 1.0);
        camera.relative_velocity = Vec3::NEG_Z;

        // Relative forward maps back through the inverse of the yaw.
        let expected = Mat3::from_rotation_y(FRAC_PI_2).inverse() * Vec3::NEG_Z;
        assert!(camera.absolute_velocity().abs_diff_eq(expected, 1e-6));

        camera.integrate(&config);
        assert!(camera.transform().position.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn pitch_is_clamped() {
        let config = SimulationConfig::default();
        let mut camera = camera_at_origin();
        let mut input = KeyboardState::new();
        input.add_mouse_delta(Vec2::new(0.0, 100.0));

        camera.process_input(&input, 1.0, &config);

        assert_eq!(camera.transform().rotation.x, FRAC_PI_2);
        assert_eq!(camera.transform().rotation.y, 0.0);
    }

    #[test]
    fn yaw_is_unbounded() {
        let config = SimulationConfig::default();
        let mut camera = camera_at_origin();
        let mut input = KeyboardState::new();
        input.add_mouse_delta(Vec2::new(100.0, 0.0));

        camera.process_input(&input, 1.0, &config);

        assert!((camera.transform().rotation.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn moved_tracks_input_and_residual_velocity() {
        let config = SimulationConfig::default();
        let mut camera = camera_at_origin();
        let idle = KeyboardState::new();

        camera.process_input(&idle, 0.016, &config);
        assert!(!camera.moved());

        camera.relative_velocity = Vec3::new(0.0, 0.0, 1e-4);
        camera.process_input(&idle, 0.016, &config);
        assert!(camera.moved());
    }

    #[test]
    fn damping_decays_then_snaps_to_zero() {
        let config = SimulationConfig::default();
        let mut camera = camera_at_origin();
        camera.relative_velocity = Vec3::new(10.0, 0.0, 0.0);

        for _ in 0..90 {
            camera.integrate(&config);
        }
        assert!(camera.relative_velocity.length() > 0.0);

        for _ in 0..10 {
            camera.integrate(&config);
        }
        assert_eq!(camera.relative_velocity, Vec3::ZERO);
    }

    #[test]
    fn upload_pushes_transform_and_moved_flag() {
        let config = SimulationConfig::default();
        let mut camera = Camera::new(Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.0), Vec3::ONE), 0.3);
        let mut input = KeyboardState::new();
        input.press(KeyCode::KeyD);
        camera.process_input(&input, 0.1, &config);

        let mut uniform = CameraUniform::new();
        camera.upload_transform(&mut uniform);

        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.rotation, [0.1, 0.2, 0.0]);
        assert_eq!(uniform.moved, 1);
    }

    #[test]
    fn default_camera_starts_behind_origin() {
        assert_eq!(Camera::default().transform().position, Vec3::new(0.0, 1.0, 3.0));
    }
}
