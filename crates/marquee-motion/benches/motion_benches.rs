//! Benchmarks for the per-tick and per-frame hot paths.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use marquee_motion::{MotionConfig, PatternKind, generate, place, step};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_generate(c: &mut Criterion) {
    let config = MotionConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("generate", |b| {
        b.iter(|| generate(black_box(&config), &mut rng))
    });
}

fn bench_step(c: &mut Criterion) {
    let config = MotionConfig::default();
    let params = generate(&config, &mut StdRng::seed_from_u64(2));
    let mut kinematics = params.kinematics(&config);

    c.bench_function("step", |b| {
        b.iter(|| step(black_box(params.pattern), &mut kinematics, black_box(0.05), &config))
    });
}

fn bench_place(c: &mut Criterion) {
    let config = MotionConfig::default();
    let mut rng = StdRng::seed_from_u64(3);

    for pattern in PatternKind::ALL {
        let mut params = generate(&config, &mut rng);
        params.pattern = pattern;
        let position = params.kinematics(&config).position;

        c.bench_function(&format!("place_{pattern}"), |b| {
            b.iter(|| place(&params, black_box(position), black_box(12.34), &config))
        });
    }
}

criterion_group!(benches, bench_generate, bench_step, bench_place);
criterion_main!(benches);
