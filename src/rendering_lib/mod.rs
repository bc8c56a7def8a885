// src/rendering_lib/mod.rs

pub mod uniforms;

pub use uniforms::{CameraUniform, RenderSettings, UniformSink};
