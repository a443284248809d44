//! Tunable ranges, drift profiles and field bounds.
//!
//! All coordinates are percent of the field (0..100 on both axes).

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pattern::DriftClass;

/// Errors reported by [`MotionConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A sampling range is non-finite or has `min > max`.
    #[error("invalid range for {name}: [{min}, {max}]")]
    InvalidRange {
        /// Name of the offending field.
        name: &'static str,
        /// Lower end.
        min: f32,
        /// Upper end.
        max: f32,
    },

    /// A bounds rectangle is empty, non-finite, or leaves the field.
    #[error("invalid bounds for {name}: min {min}, max {max}")]
    InvalidBounds {
        /// Name of the offending field.
        name: &'static str,
        /// Lower corner.
        min: Vec2,
        /// Upper corner.
        max: Vec2,
    },

    /// A drift multiplier is negative or non-finite.
    #[error("invalid drift multiplier for {class}: {value}")]
    InvalidMultiplier {
        /// Drift class the multiplier belongs to.
        class: DriftClass,
        /// The rejected value.
        value: f32,
    },

    /// The render clamp is tighter than a drift class's reflection box.
    #[error("render bounds must contain the {class} reflection bounds")]
    RenderBoundsTooTight {
        /// Drift class whose bounds escape the render clamp.
        class: DriftClass,
    },
}

/// Closed interval sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueRange {
    /// Lower end (inclusive).
    pub min: f32,
    /// Upper end (inclusive).
    pub max: f32,
}

impl ValueRange {
    /// Creates a range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies in the range.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draws a value uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Axis-aligned rectangle in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldBounds {
    /// Lower corner (left, top).
    pub min: Vec2,
    /// Upper corner (right, bottom).
    pub max: Vec2,
}

impl FieldBounds {
    /// The whole field.
    pub const FIELD: FieldBounds = FieldBounds {
        min: Vec2::ZERO,
        max: Vec2::splat(100.0),
    };

    /// Creates square bounds with the same interval on both axes.
    pub const fn square(min: f32, max: f32) -> Self {
        Self {
            min: Vec2::splat(min),
            max: Vec2::splat(max),
        }
    }

    /// Returns the field inset by half of `footprint` on each side.
    pub fn inset_by_footprint(footprint: Vec2) -> Self {
        let half = footprint * 0.5;
        Self {
            min: Self::FIELD.min + half,
            max: Self::FIELD.max - half,
        }
    }

    /// Returns true if `point` lies inside (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns true if `other` lies entirely inside these bounds.
    pub fn contains_bounds(&self, other: &FieldBounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Clamps `point` into the bounds.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Draws a point uniformly, independently per axis.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            ValueRange::new(self.min.x, self.max.x).sample(rng),
            ValueRange::new(self.min.y, self.max.y).sample(rng),
        )
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min.cmplt(self.max).all()
            && Self::FIELD.contains_bounds(self);
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// How a drift class moves its base position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriftProfile {
    /// Scales `velocity * dt` into field units.
    pub multiplier: f32,
    /// Reflection box for the base position.
    pub bounds: FieldBounds,
}

/// Configuration for generation, integration and sampling.
///
/// The defaults reproduce the reference motion feel; tweak individual fields
/// with the builder methods and call [`validate`](Self::validate) before use
/// when the values come from outside.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Drift speed, in field units per tick before the class multiplier.
    pub speed: ValueRange,
    /// Oscillation amplitude.
    pub amplitude: ValueRange,
    /// Oscillation frequency used by Bounce, Zigzag, Pendulum and Figure8.
    pub frequency: ValueRange,
    /// Angular rate used by Circular and Spiral.
    pub rotation_speed: ValueRange,
    /// Visual scale factor.
    pub scale: ValueRange,
    /// Typical rendered label size (width, height) in percent of the field.
    pub footprint: Vec2,
    /// Drift profile for orbiting patterns.
    pub orbiting: DriftProfile,
    /// Drift profile for fast patterns.
    pub fast: DriftProfile,
    /// Final clamp applied to sampled positions.
    pub render_bounds: FieldBounds,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: ValueRange::new(0.1, 0.6),
            amplitude: ValueRange::new(5.0, 20.0),
            frequency: ValueRange::new(0.01, 0.03),
            rotation_speed: ValueRange::new(0.001, 0.006),
            scale: ValueRange::new(0.8, 1.3),
            footprint: Vec2::new(8.0, 6.0),
            orbiting: DriftProfile {
                multiplier: 20.0,
                bounds: FieldBounds::square(10.0, 90.0),
            },
            fast: DriftProfile {
                multiplier: 100.0,
                bounds: FieldBounds::square(5.0, 95.0),
            },
            render_bounds: FieldBounds::square(5.0, 95.0),
        }
    }
}

impl MotionConfig {
    /// Builder: set the speed range.
    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed = ValueRange::new(min, max);
        self
    }

    /// Builder: set the amplitude range.
    pub fn with_amplitude(mut self, min: f32, max: f32) -> Self {
        self.amplitude = ValueRange::new(min, max);
        self
    }

    /// Builder: set the render clamp.
    pub fn with_render_bounds(mut self, bounds: FieldBounds) -> Self {
        self.render_bounds = bounds;
        self
    }

    /// Builder: set the label footprint used for the spawn region.
    pub fn with_footprint(mut self, footprint: Vec2) -> Self {
        self.footprint = footprint;
        self
    }

    /// Returns the drift profile for a class.
    pub fn drift(&self, class: DriftClass) -> &DriftProfile {
        match class {
            DriftClass::Orbiting => &self.orbiting,
            DriftClass::Fast => &self.fast,
        }
    }

    /// Region new labels spawn in: the field inset by half the footprint.
    pub fn spawn_region(&self) -> FieldBounds {
        FieldBounds::inset_by_footprint(self.footprint)
    }

    /// Checks every range and bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.speed.validate("speed")?;
        self.amplitude.validate("amplitude")?;
        self.frequency.validate("frequency")?;
        self.rotation_speed.validate("rotation_speed")?;
        self.scale.validate("scale")?;
        self.spawn_region().validate("footprint")?;
        self.render_bounds.validate("render_bounds")?;

        for class in [DriftClass::Orbiting, DriftClass::Fast] {
            let profile = self.drift(class);
            if !profile.multiplier.is_finite() || profile.multiplier < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    class,
                    value: profile.multiplier,
                });
            }
            let name = match class {
                DriftClass::Orbiting => "orbiting.bounds",
                DriftClass::Fast => "fast.bounds",
            };
            profile.bounds.validate(name)?;
            if !self.render_bounds.contains_bounds(&profile.bounds) {
                return Err(ConfigError::RenderBoundsTooTight { class });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(MotionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_spawn_region_from_footprint() {
        let region = MotionConfig::default().spawn_region();
        assert!((region.min - Vec2::new(4.0, 3.0)).length() < 0.001);
        assert!((region.max - Vec2::new(96.0, 97.0)).length() < 0.001);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = MotionConfig::default().with_speed(0.6, 0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "speed", .. })
        ));
    }

    #[test]
    fn test_amplitude_range_checked() {
        let config = MotionConfig::default().with_amplitude(2.0, 8.0);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.amplitude, ValueRange::new(2.0, 8.0));

        let config = MotionConfig::default().with_amplitude(f32::NAN, 8.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                name: "amplitude",
                ..
            })
        ));
    }

    #[test]
    fn test_tight_render_bounds_rejected() {
        let config = MotionConfig::default().with_render_bounds(FieldBounds::square(20.0, 80.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::RenderBoundsTooTight {
                class: DriftClass::Orbiting
            })
        );
    }

    #[test]
    fn test_oversized_footprint_rejected() {
        let config = MotionConfig::default().with_footprint(Vec2::new(120.0, 6.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBounds {
                name: "footprint",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let mut config = MotionConfig::default();
        config.fast.multiplier = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMultiplier {
                class: DriftClass::Fast,
                ..
            })
        ));
    }

    #[test]
    fn test_range_sampling() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = ValueRange::new(5.0, 20.0);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }

        let degenerate = ValueRange::new(3.0, 3.0);
        assert_eq!(degenerate.sample(&mut rng), 3.0);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = FieldBounds::square(10.0, 90.0);
        assert_eq!(bounds.clamp(Vec2::new(-5.0, 95.0)), Vec2::new(10.0, 90.0));
        assert!(bounds.contains(Vec2::new(10.0, 90.0)));
        assert!(!bounds.contains(Vec2::new(9.99, 50.0)));
    }
}
