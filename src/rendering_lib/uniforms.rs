// src/rendering_lib/uniforms.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const CAMERA_POSITION: &str = "camera_position";
pub const CAMERA_ROTATION: &str = "camera_rotation";
pub const CAMERA_MOVED: &str = "camera_moved";
pub const RAY_MARCHING_ENABLED: &str = "ray_marching_enabled";
pub const DENOISING_ENABLED: &str = "denoising_enabled";

/// Named shader parameters the simulation writes into once per frame.
pub trait UniformSink {
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_int(&mut self, name: &str, value: i32);
}

/// Uniform block for the ray-marching pass. Every row is 16 bytes so the
/// layout matches std140 without extra padding rules.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
pub struct CameraUniform {
    pub position: [f32; 3],
    pub moved: i32,
    pub rotation: [f32; 3],
    pub ray_marching_enabled: i32,
    pub denoising_enabled: i32,
    _padding: [i32; 3],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl CameraUniform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl UniformSink for CameraUniform {
    fn set_vec3(&mut self, name: &str, value: Vec3) {
        match name {
            CAMERA_POSITION => self.position = value.to_array(),
            CAMERA_ROTATION => self.rotation = value.to_array(),
            _ => log::trace!("CameraUniform has no vec3 '{}'", name),
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        match name {
            CAMERA_MOVED => self.moved = value,
            RAY_MARCHING_ENABLED => self.ray_marching_enabled = value,
            DENOISING_ENABLED => self.denoising_enabled = value,
            _ => log::trace!("CameraUniform has no int '{}'", name),
        }
    }
}

/// Switches for the external ray-marching pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub ray_marching_enabled: bool,
    pub denoising_enabled: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ray_marching_enabled: true,
            denoising_enabled: true,
        }
    }
}

impl RenderSettings {
    pub fn toggle_ray_marching(&mut self) {
        self.ray_marching_enabled = !self.ray_marching_enabled;
        log::info!("ray marching {}", if self.ray_marching_enabled { "enabled" } else { "disabled" });
    }

    pub fn toggle_denoising(&mut self) {
        self.denoising_enabled = !self.denoising_enabled;
        log::info!("denoising {}", if self.denoising_enabled { "enabled" } else { "disabled" });
    }

    pub fn upload(&self, sink: &mut impl UniformSink) {
        sink.set_int(RAY_MARCHING_ENABLED, self.ray_marching_enabled as i32);
        sink.set_int(DENOISING_ENABLED, self.denoising_enabled as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_three_rows() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 48);
        assert_eq!(CameraUniform::new().as_bytes().len(), 48);
    }

    #[test]
    fn named_writes_land_in_their_fields() {
        let mut uniform = CameraUniform::new();
        uniform.set_vec3(CAMERA_POSITION, Vec3::new(1.0, 2.0, 3.0));
        uniform.set_vec3(CAMERA_ROTATION, Vec3::new(0.5, 0.0, 0.0));
        uniform.set_int(CAMERA_MOVED, 1);
        uniform.set_vec3("unused", Vec3::ONE);

        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.rotation, [0.5, 0.0, 0.0]);
        assert_eq!(uniform.moved, 1);
        assert_eq!(&uniform.as_bytes()[12..16], &1i32.to_ne_bytes());
    }

    #[test]
    fn render_settings_upload_as_ints() {
        let mut settings = RenderSettings::default();
        settings.toggle_denoising();

        let mut uniform = CameraUniform::new();
        settings.upload(&mut uniform);

        assert_eq!(uniform.ray_marching_enabled, 1);
        assert_eq!(uniform.denoising_enabled, 0);
    }
}
