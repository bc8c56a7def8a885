// src/main.rs
//! Demo binary: walks an observer through the demo (or a JSON) scene.
//!
//! Usage:
//!   portals_rt [--scene scene.json] [--config config.json]
//!
//! Controls: WASD/arrows move, Space/Shift up/down, mouse looks once the
//! window is clicked, F1/F2 toggle ray marching/denoising, Escape quits.

pub mod app;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::PortalApp;
use portals_rt::config::EngineConfig;
use portals_rt::demo_scene;
use portals_rt::engine_lib::{Scene, SceneDescription};

#[derive(Debug, Default)]
struct Args {
    scene: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut parsed = Args::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scene" if i + 1 < args.len() => {
                parsed.scene = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            other => {
                log::warn!("Ignoring argument '{}'", other);
                i += 1;
            }
        }
    }
    parsed
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    EngineConfig::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn load_scene(path: Option<&PathBuf>) -> anyhow::Result<SceneDescription> {
    let Some(path) = path else {
        return Ok(demo_scene::create_demo_scene());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read scene {}", path.display()))?;
    SceneDescription::from_json_str(&text).with_context(|| format!("parse scene {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args();
    let config = load_config(args.config.as_ref())?;
    let description = load_scene(args.scene.as_ref())?;
    let scene = Scene::from_description(&description, config.simulation.speed).context("build scene")?;

    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("create event loop: {e}"))?;
    let window = WindowBuilder::new()
        .with_title("Portals RT")
        .with_inner_size(winit::dpi::LogicalSize::new(1600, 1200))
        .build(&event_loop)
        .map_err(|e| anyhow::anyhow!("create window: {e}"))?;

    let mut app_state = PortalApp::new(scene, config);
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    if let WindowEvent::CloseRequested = event {
                        target.exit();
                    }
                }
            }
            Event::DeviceEvent { event: device_event, .. } => {
                app_state.handle_device_event(&device_event);
            }
            Event::AboutToWait => {
                let now = std::time::Instant::now();
                let dt = (now - last_time).as_secs_f32();
                last_time = now;

                app_state.update(dt);
                log::trace!("camera uniform: {:?}", app_state.uniform());

                if app_state.exit_requested() {
                    target.exit();
                } else {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })
    .map_err(|e| anyhow::anyhow!("event loop: {e}"))
}
