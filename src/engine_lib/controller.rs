// src/engine_lib/controller.rs

use std::collections::HashSet;

use glam::{Vec2, Vec3};
use winit::{
    event::{DeviceEvent, ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Anything that can answer "is this key held" and "how far did the mouse move".
pub trait InputSource {
    fn is_key_down(&self, key: KeyCode) -> bool;
    fn mouse_delta(&self) -> Vec2;
}

/// Turns raw input into movement and look directions for one tick.
pub struct Controls<'a, I: InputSource + ?Sized> {
    input: &'a I,
    pub mouse_sensitivity: Vec2,
}

impl<'a, I: InputSource + ?Sized> Controls<'a, I> {
    pub fn new(input: &'a I, mouse_sensitivity: Vec2) -> Self {
        Self { input, mouse_sensitivity }
    }

    pub fn one_of_keys_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.input.is_key_down(*key))
    }

    /// `1` for `straight`, `-1` for `inverse`, `0` when both or neither are held.
    pub fn opposite_input(straight: bool, inverse: bool) -> f32 {
        match (straight, inverse) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Forward/strafe in the observer's own frame. Forward is -Z.
    pub fn move_relative_direction(&self) -> Vec3 {
        let forward = Self::opposite_input(
            self.one_of_keys_down(&[KeyCode::KeyW, KeyCode::ArrowUp]),
            self.one_of_keys_down(&[KeyCode::KeyS, KeyCode::ArrowDown]),
        );
        let right = Self::opposite_input(
            self.one_of_keys_down(&[KeyCode::KeyD, KeyCode::ArrowRight]),
            self.one_of_keys_down(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
        );
        Vec3::NEG_Z * forward + Vec3::X * right
    }

    /// Vertical movement, independent of where the observer looks.
    pub fn move_absolute_direction(&self) -> Vec3 {
        Vec3::Y * Self::opposite_input(
            self.one_of_keys_down(&[KeyCode::Space]),
            self.one_of_keys_down(&[KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        )
    }

    /// Mouse Y drives pitch (rotation about X), mouse X drives yaw.
    pub fn look_direction(&self) -> Vec3 {
        let raw = self.input.mouse_delta() * self.mouse_sensitivity;
        Vec3::new(raw.y, raw.x, 0.0)
    }

    pub fn is_input_active(&self) -> bool {
        self.move_relative_direction() != Vec3::ZERO
            || self.move_absolute_direction() != Vec3::ZERO
            || self.input.mouse_delta() != Vec2::ZERO
    }
}

/// Held keys and accumulated mouse motion, fed from winit events.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    mouse_delta: Vec2,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        if self.held.insert(key) {
            self.pressed_this_frame.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Drops every held key, pending press edge and mouse motion, e.g. when
    /// the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pressed_this_frame.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn add_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    /// Runs `callback` if `key` went down since the last [`end_frame`](Self::end_frame).
    pub fn on_key_press(&self, key: KeyCode, callback: impl FnOnce()) -> &Self {
        if self.was_pressed(key) {
            callback();
        }
        self
    }

    /// Clears per-frame state: key-press edges and mouse motion.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let PhysicalKey::Code(code) = key_event.physical_key else {
                    return false;
                };
                match key_event.state {
                    ElementState::Pressed => self.press(code),
                    ElementState::Released => self.release(code),
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.add_mouse_delta(Vec2::new(*dx as f32, *dy as f32));
        }
    }
}

impl InputSource for KeyboardState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}
