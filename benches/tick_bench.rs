//! Benchmarks for placement generation and the per-frame scene tick.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evergreen::camera::Camera;
use evergreen::options::Options;
use evergreen::placement::{generate, seeded_rng, ConeDistribution};
use evergreen::scene::{FrameInput, TreeScene};
use glam::Vec3;

fn camera_at(distance: f32) -> Camera {
    let target = Vec3::new(-0.1, 0.8, 0.0);
    Camera {
        eye: target + Vec3::new(0.0, 0.0, distance),
        target,
        up: Vec3::Y,
        aspect: 16.0 / 9.0,
        fovy: 45.0,
        znear: 0.1,
        zfar: 50.0,
    }
}

fn generation_benchmark(c: &mut Criterion) {
    let foliage = ConeDistribution::foliage();
    c.bench_function("generate_foliage_1800", |b| {
        b.iter(|| {
            let mut rng = seeded_rng(1);
            black_box(generate(black_box(1800), &foliage, &mut rng))
        });
    });

    let options = Options::default();
    c.bench_function("build_default_scene", |b| {
        b.iter(|| black_box(TreeScene::<u32>::new(&options, black_box(7))));
    });
}

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tick");

    for (name, distance) in [("assembled", 8.5), ("bursting", 5.5), ("exploded", 4.0)] {
        let camera = camera_at(distance);
        let Ok(mut scene) = TreeScene::<u32>::new(&Options::default(), 7) else {
            return;
        };
        let mut frame = 0;
        group.bench_function(name, |b| {
            b.iter(|| {
                frame += 1;
                let view = scene.tick(FrameInput::fixed(frame, 1.0 / 60.0), &camera);
                black_box(view.visible_instances())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, generation_benchmark, tick_benchmark);
criterion_main!(benches);
