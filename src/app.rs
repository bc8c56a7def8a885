// src/app.rs

use winit::{
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    keyboard::KeyCode,
    window::{CursorGrabMode, Window},
};

use portals_rt::config::EngineConfig;
use portals_rt::engine_lib::{step_scene, KeyboardState, Scene, SceneObject};
use portals_rt::rendering_lib::CameraUniform;

const READOUT_INTERVAL_SECS: f32 = 1.0;

pub struct PortalApp {
    scene: Scene,
    config: EngineConfig,
    input: KeyboardState,
    uniform: CameraUniform,
    cursor_grabbed: bool,
    exit_requested: bool,
    readout_timer: f32,
}

impl PortalApp {
    pub fn new(scene: Scene, config: EngineConfig) -> Self {
        Self {
            scene,
            config,
            input: KeyboardState::new(),
            uniform: CameraUniform::new(),
            cursor_grabbed: false,
            exit_requested: false,
            readout_timer: 0.0,
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        match event {
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } if !self.cursor_grabbed => {
                self.grab_cursor(window, true);
                true
            }
            WindowEvent::Focused(false) if self.cursor_grabbed => {
                self.grab_cursor(window, false);
                self.input.handle_window_event(event)
            }
            _ => self.input.handle_window_event(event),
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if self.cursor_grabbed {
            self.input.handle_device_event(event);
        }
    }

    pub fn grab_cursor(&mut self, window: &Window, grab: bool) {
        if grab == self.cursor_grabbed {
            return;
        }
        let mode = if grab { CursorGrabMode::Confined } else { CursorGrabMode::None };
        let result = window.set_cursor_grab(mode).or_else(|e| {
            if grab {
                window.set_cursor_grab(CursorGrabMode::Locked)
            } else {
                Err(e)
            }
        });
        match result {
            Ok(()) => {
                window.set_cursor_visible(!grab);
                self.cursor_grabbed = grab;
            }
            Err(e) => log::warn!("Could not change cursor grab: {}", e),
        }
    }

    pub fn update(&mut self, dt: f32) {
        let render = &mut self.config.render;
        let mut exit = false;
        self.input
            .on_key_press(KeyCode::Escape, || exit = true)
            .on_key_press(KeyCode::F1, || render.toggle_ray_marching())
            .on_key_press(KeyCode::F2, || render.toggle_denoising());
        self.exit_requested |= exit;

        let crossings = step_scene(
            &mut self.scene,
            &self.input,
            dt,
            &self.config.simulation,
            &self.config.render,
            &mut self.uniform,
        );
        for crossing in &crossings {
            log::info!("Portal transfer {} -> {}", crossing.source, crossing.target);
        }

        self.input.end_frame();

        self.readout_timer += dt;
        if self.readout_timer >= READOUT_INTERVAL_SECS {
            self.readout_timer = 0.0;
            let p = self.scene.camera.position();
            let fps = if dt > 0.0 { (1.0 / dt).round() } else { 0.0 };
            log::info!("x: {:.2}, y: {:.2}, z: {:.2} | {} fps", p.x, p.y, p.z, fps);
        }
    }
}
