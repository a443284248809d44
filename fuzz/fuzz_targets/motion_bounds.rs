#![no_main]

use glam::Vec2;
use libfuzzer_sys::fuzz_target;
use marquee_motion::{
    ColorTag, Kinematics, MotionConfig, MotionParameters, PatternKind, place, step,
};

fn float(bytes: &[u8], index: usize) -> f32 {
    let start = index * 4;
    match bytes.get(start..start + 4) {
        Some(chunk) => f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
        None => 0.0,
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let config = MotionConfig::default();
    let pattern = PatternKind::ALL[selector as usize % PatternKind::ALL.len()];

    // Arbitrary finite inputs must never escape the reflection or render boxes
    let values: Vec<f32> = (0..6)
        .map(|i| float(rest, i))
        .map(|v| if v.is_finite() { v.clamp(-1.0e6, 1.0e6) } else { 0.0 })
        .collect();

    let params = MotionParameters {
        pattern,
        base_position: Vec2::new(50.0, 50.0),
        speed: 0.3,
        direction: 0.0,
        velocity: Vec2::new(values[0], values[1]).clamp_length_max(1.0),
        amplitude: values[2].abs().min(20.0),
        frequency: values[3].abs().min(0.03),
        rotation_speed: values[4].abs().min(0.006),
        scale: 1.0,
        color: ColorTag::PurplePink,
    };

    let bounds = config.drift(pattern.drift_class()).bounds;
    let mut kinematics = Kinematics::new(Vec2::new(50.0, 50.0), params.velocity);
    for _ in 0..64 {
        step(pattern, &mut kinematics, 0.05, &config);
        assert!(bounds.contains(kinematics.position));
    }

    let placement = place(&params, kinematics.position, values[5], &config);
    assert!(config.render_bounds.contains(placement.position));
});
