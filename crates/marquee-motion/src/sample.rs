//! Per-frame pattern sampling.
//!
//! Sampling is pure: it reads the integrated position and the immutable
//! parameters, overlays the pattern's oscillation for the elapsed time and
//! clamps the result to the render bounds.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::generate::MotionParameters;
use crate::pattern::{ColorTag, PatternKind};

/// Largest orbit radius a spiral may use.
pub const SPIRAL_MAX_RADIUS: f32 = 20.0;

/// Where and how to draw a label for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Center position in percent of the field.
    pub position: Vec2,
    /// Uniform scale factor.
    pub scale: f32,
    /// Cosmetic color.
    pub color: ColorTag,
}

impl Placement {
    /// Horizontal position of the label center, percent of field width.
    pub fn left_percent(&self) -> f32 {
        self.position.x
    }

    /// Vertical position of the label center, percent of field height.
    pub fn top_percent(&self) -> f32 {
        self.position.y
    }

    /// CSS transform that centers the label on its position and scales it.
    pub fn transform_css(&self) -> String {
        format!("translate(-50%, -50%) scale({})", self.scale)
    }
}

/// Converts a millisecond start/now pair into elapsed seconds.
///
/// The result is negative while `now` is still before `start`.
pub fn elapsed_seconds(start_ms: u64, now_ms: u64) -> f32 {
    let delta = now_ms as i128 - start_ms as i128;
    (delta as f64 / 1000.0) as f32
}

/// Oscillatory offset of `params`' pattern at time `t` seconds.
pub fn pattern_offset(params: &MotionParameters, t: f32) -> Vec2 {
    let amp = params.amplitude;
    let freq = params.frequency;
    let rot = params.rotation_speed;

    match params.pattern {
        PatternKind::Circular => {
            let angle = t * rot * 10.0;
            Vec2::new(angle.cos(), angle.sin()) * (amp * 0.3)
        }
        PatternKind::Bounce => Vec2::new(0.0, (t * freq * 100.0).sin().abs() * amp * 0.2),
        PatternKind::Zigzag => Vec2::new((t * freq * 50.0).sin() * amp * 0.2, 0.0),
        PatternKind::Spiral => {
            let angle = t * rot * 15.0;
            let radius = (amp * 0.3).min(SPIRAL_MAX_RADIUS);
            Vec2::new(angle.cos(), angle.sin()) * radius
        }
        PatternKind::Pendulum => Vec2::new(
            (t * freq * 30.0).sin() * amp * 0.4,
            (t * freq * 20.0).cos() * amp * 0.2,
        ),
        PatternKind::Figure8 => Vec2::new(
            (t * freq * 40.0).sin() * amp * 0.3,
            (t * freq * 80.0).sin() * amp * 0.3,
        ),
    }
}

/// Samples the final placement for one frame.
///
/// `position` is the integrator's latest base position and `t` the seconds
/// elapsed since the label's animation start.
pub fn place(
    params: &MotionParameters,
    position: Vec2,
    t: f32,
    config: &MotionConfig,
) -> Placement {
    let mut offset = pattern_offset(params, t);
    if !offset.is_finite() {
        offset = Vec2::ZERO;
    }

    Placement {
        position: config.render_bounds.clamp(position + offset),
        scale: params.scale,
        color: params.color,
    }
}
