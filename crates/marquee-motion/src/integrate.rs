//! Fixed-tick drift integration with elastic reflection.

use glam::Vec2;

use crate::config::{FieldBounds, MotionConfig};
use crate::generate::Kinematics;
use crate::pattern::PatternKind;

/// Which axes reflected during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reflection {
    /// The x velocity component was negated.
    pub x: bool,
    /// The y velocity component was negated.
    pub y: bool,
}

impl Reflection {
    /// Returns true if either axis reflected.
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

/// Advances `kinematics` by one tick of `dt` seconds.
///
/// The position moves by `velocity * dt * multiplier`, where the multiplier
/// and reflection box come from the pattern's drift class. A component that
/// reaches or crosses a wall while moving toward it is negated, and the
/// coordinate is clamped back into the box. Only position and velocity are
/// touched.
pub fn step(
    pattern: PatternKind,
    kinematics: &mut Kinematics,
    dt: f32,
    config: &MotionConfig,
) -> Reflection {
    let profile = config.drift(pattern.drift_class());
    kinematics.position += kinematics.velocity * dt * profile.multiplier;
    reflect(kinematics, &profile.bounds)
}

/// Applies elastic reflection against `bounds` and clamps the position.
pub fn reflect(kinematics: &mut Kinematics, bounds: &FieldBounds) -> Reflection {
    let Kinematics { position, velocity } = kinematics;
    let x = reflect_axis(&mut position.x, &mut velocity.x, bounds.min.x, bounds.max.x);
    let y = reflect_axis(&mut position.y, &mut velocity.y, bounds.min.y, bounds.max.y);
    Reflection { x, y }
}

fn reflect_axis(position: &mut f32, velocity: &mut f32, min: f32, max: f32) -> bool {
    // Only flip when heading into the wall; a component already moving away
    // keeps its sign even while the coordinate still sits on the wall.
    let hit = (*position >= max && *velocity > 0.0) || (*position <= min && *velocity < 0.0);
    if hit {
        *velocity = -*velocity;
    }
    *position = position.clamp(min, max);
    hit
}

/// Runs `ticks` steps and returns the final position.
pub fn advance(
    pattern: PatternKind,
    kinematics: &mut Kinematics,
    dt: f32,
    ticks: usize,
    config: &MotionConfig,
) -> Vec2 {
    for _ in 0..ticks {
        step(pattern, kinematics, dt, config);
    }
    kinematics.position
}
