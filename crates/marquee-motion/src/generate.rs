//! Motion profile generation.

use glam::Vec2;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{MotionConfig, ValueRange};
use crate::pattern::{ColorTag, PatternKind};

/// Complete, self-contained motion description for one label.
///
/// Generated once per label and never modified afterwards; the integrated
/// position lives in [`Kinematics`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionParameters {
    /// Pattern the label follows.
    pub pattern: PatternKind,
    /// Spawn position in percent of the field.
    pub base_position: Vec2,
    /// Drift speed (length of `velocity`).
    pub speed: f32,
    /// Drift direction in radians, in `[0, TAU)`.
    pub direction: f32,
    /// Initial drift velocity in field units per tick.
    pub velocity: Vec2,
    /// Oscillation amplitude.
    pub amplitude: f32,
    /// Oscillation frequency.
    pub frequency: f32,
    /// Angular rate for rotating patterns.
    pub rotation_speed: f32,
    /// Uniform visual scale.
    pub scale: f32,
    /// Cosmetic color.
    pub color: ColorTag,
}

impl MotionParameters {
    /// Generates parameters from the thread-local RNG with default ranges.
    pub fn random() -> Self {
        generate(&MotionConfig::default(), &mut rand::thread_rng())
    }

    /// Returns the initial integrated state for these parameters.
    ///
    /// The spawn position is clamped into the pattern's reflection box so the
    /// integrated position starts inside it.
    pub fn kinematics(&self, config: &MotionConfig) -> Kinematics {
        let bounds = config.drift(self.pattern.drift_class()).bounds;
        Kinematics {
            position: bounds.clamp(self.base_position),
            velocity: self.velocity,
        }
    }
}

/// Mutable drift state advanced by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kinematics {
    /// Current base position in percent of the field.
    pub position: Vec2,
    /// Current velocity in field units per tick.
    pub velocity: Vec2,
}

impl Kinematics {
    /// Creates a state from position and velocity.
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Draws a fresh set of motion parameters.
///
/// Every draw is independent and uniform over the ranges in `config`:
/// pattern and color over their full sets, position over the spawn region,
/// and direction over `[0, TAU)`.
pub fn generate<R: Rng + ?Sized>(config: &MotionConfig, rng: &mut R) -> MotionParameters {
    let pattern = PatternKind::ALL[rng.gen_range(0..PatternKind::ALL.len())];
    let base_position = config.spawn_region().sample(rng);

    let speed = config.speed.sample(rng);
    let direction = rng.gen_range(0.0..std::f32::consts::TAU);
    let velocity = Vec2::from_angle(direction) * speed;

    let amplitude = config.amplitude.sample(rng);
    let frequency = config.frequency.sample(rng);
    let rotation_speed = config.rotation_speed.sample(rng);
    let color = ColorTag::PALETTE[rng.gen_range(0..ColorTag::PALETTE.len())];
    let scale = config.scale.sample(rng);

    MotionParameters {
        pattern,
        base_position,
        speed,
        direction,
        velocity,
        amplitude,
        frequency,
        rotation_speed,
        scale,
        color,
    }
}

/// Returns true if `params` could have been produced by [`generate`] with
/// `config`.
pub fn is_within_config(params: &MotionParameters, config: &MotionConfig) -> bool {
    let in_range = |range: &ValueRange, v: f32| range.contains(v);
    in_range(&config.speed, params.speed)
        && in_range(&config.amplitude, params.amplitude)
        && in_range(&config.frequency, params.frequency)
        && in_range(&config.rotation_speed, params.rotation_speed)
        && in_range(&config.scale, params.scale)
        && (0.0..std::f32::consts::TAU).contains(&params.direction)
        && config.spawn_region().contains(params.base_position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_within_ranges() {
        let config = MotionConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let params = generate(&config, &mut rng);
            assert!(is_within_config(&params, &config), "{params:?}");
            assert!((params.velocity.length() - params.speed).abs() < 0.001);
        }
    }

    #[test]
    fn test_generate_covers_patterns_and_palette() {
        let config = MotionConfig::default();
        let mut rng = StdRng::seed_from_u64(99);

        let mut patterns = HashSet::new();
        let mut colors = HashSet::new();
        for _ in 0..500 {
            let params = generate(&config, &mut rng);
            patterns.insert(params.pattern);
            colors.insert(params.color);
        }
        assert_eq!(patterns.len(), PatternKind::ALL.len());
        assert_eq!(colors.len(), ColorTag::PALETTE.len());
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let config = MotionConfig::default();
        let a = generate(&config, &mut StdRng::seed_from_u64(1234));
        let b = generate(&config, &mut StdRng::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_kinematics_start_inside_drift_bounds() {
        let config = MotionConfig::default();
        let params = MotionParameters {
            pattern: PatternKind::Spiral,
            base_position: Vec2::new(4.0, 96.0),
            speed: 0.2,
            direction: 0.0,
            velocity: Vec2::new(0.2, 0.0),
            amplitude: 10.0,
            frequency: 0.02,
            rotation_speed: 0.003,
            scale: 1.0,
            color: ColorTag::TealGreen,
        };

        let k = params.kinematics(&config);
        assert_eq!(k.position, Vec2::new(10.0, 90.0));
        assert_eq!(k.velocity, params.velocity);
    }

    #[test]
    fn test_random_uses_default_ranges() {
        let params = MotionParameters::random();
        assert!(is_within_config(&params, &MotionConfig::default()));
    }
}
