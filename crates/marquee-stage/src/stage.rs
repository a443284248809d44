//! The set of live label animations.

use rand::Rng;
use tracing::{debug, trace};

use marquee_motion::{ConfigError, Kinematics, MotionConfig, generate};

use crate::state::{LabelAnimationState, RenderDescriptor};
use crate::store::{LabelId, LabelStore};

/// Live animation states, in store order.
///
/// The stage mirrors the store's membership on [`sync`](Self::sync). The
/// integrator writes through [`tick`](Self::tick); rendering only reads.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    config: MotionConfig,
    states: Vec<LabelAnimationState>,
}

impl Stage {
    /// Creates an empty stage after validating `config`.
    pub fn new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            states: Vec::new(),
        })
    }

    /// Motion configuration in use.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Number of live labels.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if nothing is animating.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Live states, in store order.
    pub fn states(&self) -> &[LabelAnimationState] {
        &self.states
    }

    /// Looks up a live state.
    pub fn get(&self, id: LabelId) -> Option<&LabelAnimationState> {
        self.states.iter().find(|s| s.id == id)
    }

    /// Drops every live state.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Brings the live set in line with `store`.
    ///
    /// Labels that left the store are dropped. Labels already live keep their
    /// state. New labels reuse the parameters recorded in the store, or draw
    /// fresh ones and record them. New animations start at `now_ms` plus a
    /// random delay below `start_jitter_ms`.
    pub fn sync<R: Rng + ?Sized>(
        &mut self,
        store: &mut LabelStore,
        now_ms: u64,
        start_jitter_ms: u64,
        rng: &mut R,
    ) {
        let mut previous = std::mem::take(&mut self.states);
        let mut generated = Vec::new();

        for entry in store.entries() {
            if let Some(pos) = previous.iter().position(|s| s.id == entry.id) {
                self.states.push(previous.swap_remove(pos));
                continue;
            }

            let params = match entry.motion {
                Some(params) => {
                    debug!(id = %entry.id, pattern = %params.pattern, "reusing motion");
                    params
                }
                None => {
                    let params = generate(&self.config, rng);
                    debug!(
                        id = %entry.id,
                        pattern = %params.pattern,
                        color = %params.color,
                        "generated motion"
                    );
                    generated.push((entry.id, params));
                    params
                }
            };

            let jitter = if start_jitter_ms > 0 {
                rng.gen_range(0..start_jitter_ms)
            } else {
                0
            };
            self.states.push(LabelAnimationState::new(
                entry.id,
                entry.text.clone(),
                now_ms.saturating_add(jitter),
                params,
                &self.config,
            ));
        }

        for dropped in &previous {
            debug!(id = %dropped.id, "dropped animation");
        }
        for (id, params) in generated {
            store.assign_motion(id, params);
        }
    }

    /// Advances every live label by one tick of `dt` seconds.
    ///
    /// Each label is stepped independently, so the order does not matter.
    pub fn tick(&mut self, dt: f32) {
        for state in &mut self.states {
            let reflection = state.step(dt, &self.config);
            if reflection.any() {
                trace!(id = %state.id, x = reflection.x, y = reflection.y, "reflected");
            }
        }
    }

    /// Steps a single label. Unknown ids are ignored.
    pub fn step_label(&mut self, id: LabelId, dt: f32) -> Option<Kinematics> {
        let config = &self.config;
        let state = self.states.iter_mut().find(|s| s.id == id)?;
        state.step(dt, config);
        Some(state.kinematics)
    }

    /// Samples a single label. Unknown ids produce nothing.
    pub fn sample_label(&self, id: LabelId, now_ms: u64) -> Option<RenderDescriptor> {
        self.get(id).map(|s| s.sample(now_ms, &self.config))
    }

    /// Samples every live label for a frame.
    pub fn render(&self, now_ms: u64) -> Vec<RenderDescriptor> {
        self.states
            .iter()
            .map(|s| s.sample(now_ms, &self.config))
            .collect()
    }
}
