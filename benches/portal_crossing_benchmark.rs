// benches/portal_crossing_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use glam::Vec3;
use portals_rt::config::SimulationConfig;
use portals_rt::demo_scene::create_demo_scene;
use portals_rt::engine_lib::scene_logic::apply_portal_crossings;
use portals_rt::engine_lib::{Camera, Scene, SceneObject, Transform};
use rand::Rng;

// Observers scattered around the demo portals, some close enough to cross.
fn create_test_camera(rng: &mut impl Rng) -> Camera {
    let position = Vec3::new(
        rng.gen_range(-6.0..13.0),
        rng.gen_range(-1.2..5.2),
        rng.gen_range(-5.0..1.0),
    );
    let rotation = Vec3::new(rng.gen_range(-1.5..1.5), rng.gen_range(-3.1..3.1), 0.0);
    let mut camera = Camera::new(Transform::new(position, rotation, Vec3::ONE), 0.3);
    camera.relative_velocity = Vec3::new(
        rng.gen_range(-0.1..0.1),
        rng.gen_range(-0.1..0.1),
        rng.gen_range(-0.1..0.1),
    );
    camera
}

fn portal_crossing_benchmark_fn(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let scene = Scene::from_description(&create_demo_scene(), 0.3).unwrap();
    let config = SimulationConfig::default();

    const NUM_BENCH_CAMERAS: usize = 100;
    let cameras: Vec<Camera> = (0..NUM_BENCH_CAMERAS).map(|_| create_test_camera(&mut rng)).collect();

    let mut group = c.benchmark_group("PortalCrossing");

    group.bench_function("apply_portal_crossings_100_observers", |b| {
        let mut camera_iter = cameras.iter().cycle();
        b.iter(|| {
            let mut camera = camera_iter.next().unwrap().clone();
            apply_portal_crossings(black_box(&mut camera), black_box(&scene.portals))
        })
    });

    group.bench_function("process_physics_100_observers", |b| {
        let mut camera_iter = cameras.iter().cycle();
        b.iter(|| {
            let mut camera = camera_iter.next().unwrap().clone();
            camera.process_physics(black_box(&scene.portals), black_box(&config));
            camera.position()
        })
    });
    group.finish();
}

criterion_group!(benches, portal_crossing_benchmark_fn);
criterion_main!(benches);
