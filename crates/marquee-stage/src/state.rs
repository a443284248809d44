//! Live animation state of one label.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use marquee_motion::{
    ColorTag, Kinematics, MotionConfig, MotionParameters, Reflection, elapsed_seconds, place,
};

use crate::store::LabelId;

/// A label that is currently being animated.
///
/// Only `kinematics` changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnimationState {
    /// Label id.
    pub id: LabelId,
    /// Display text.
    pub text: String,
    /// Animation start in milliseconds; may lie slightly in the future.
    pub start_ms: u64,
    /// Immutable motion parameters.
    pub params: MotionParameters,
    /// Integrated drift state.
    pub kinematics: Kinematics,
}

impl LabelAnimationState {
    /// Creates a state seeded from `params`.
    pub fn new(
        id: LabelId,
        text: impl Into<String>,
        start_ms: u64,
        params: MotionParameters,
        config: &MotionConfig,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            start_ms,
            kinematics: params.kinematics(config),
            params,
        }
    }

    /// Advances the drift by one tick.
    pub fn step(&mut self, dt: f32, config: &MotionConfig) -> Reflection {
        marquee_motion::step(self.params.pattern, &mut self.kinematics, dt, config)
    }

    /// Samples the descriptor for a frame at `now_ms`.
    pub fn sample(&self, now_ms: u64, config: &MotionConfig) -> RenderDescriptor {
        let t = elapsed_seconds(self.start_ms, now_ms);
        let placement = place(&self.params, self.kinematics.position, t, config);
        RenderDescriptor {
            id: self.id,
            text: self.text.clone(),
            left_percent: placement.left_percent(),
            top_percent: placement.top_percent(),
            scale: placement.scale,
            color: placement.color,
        }
    }
}

/// Everything a renderer needs to draw one label for one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderDescriptor {
    /// Label id.
    pub id: LabelId,
    /// Display text.
    pub text: String,
    /// Center x, percent of field width.
    pub left_percent: f32,
    /// Center y, percent of field height.
    pub top_percent: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Cosmetic color.
    pub color: ColorTag,
}

impl RenderDescriptor {
    /// CSS transform that centers the label and applies its scale.
    pub fn transform_css(&self) -> String {
        format!("translate(-50%, -50%) scale({})", self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use marquee_motion::PatternKind;

    fn circular() -> MotionParameters {
        MotionParameters {
            pattern: PatternKind::Circular,
            base_position: Vec2::new(50.0, 50.0),
            speed: 0.3,
            direction: 0.0,
            velocity: Vec2::new(0.3, 0.0),
            amplitude: 10.0,
            frequency: 0.02,
            rotation_speed: 0.004,
            scale: 0.9,
            color: ColorTag::IndigoPurple,
        }
    }

    #[test]
    fn test_sample_at_start() {
        let config = MotionConfig::default();
        let state = LabelAnimationState::new(LabelId(1), "hi", 5_000, circular(), &config);

        let d = state.sample(5_000, &config);
        assert!((d.left_percent - 53.0).abs() < 0.001);
        assert!((d.top_percent - 50.0).abs() < 0.001);
        assert_eq!(d.scale, 0.9);
        assert_eq!(d.color, ColorTag::IndigoPurple);
        assert_eq!(d.text, "hi");
        assert_eq!(d.transform_css(), "translate(-50%, -50%) scale(0.9)");
    }

    #[test]
    fn test_step_only_touches_kinematics() {
        let config = MotionConfig::default();
        let mut state = LabelAnimationState::new(LabelId(1), "hi", 0, circular(), &config);
        let before = state.clone();

        state.step(0.05, &config);

        assert_eq!(state.params, before.params);
        assert_eq!(state.start_ms, before.start_ms);
        assert_eq!(state.text, before.text);
        assert!((state.kinematics.position.x - 50.3).abs() < 0.001);
    }

    #[test]
    fn test_sample_does_not_mutate() {
        let config = MotionConfig::default();
        let state = LabelAnimationState::new(LabelId(1), "hi", 0, circular(), &config);
        let a = state.sample(12_345, &config);
        let b = state.sample(12_345, &config);
        assert_eq!(a, b);
    }
}
