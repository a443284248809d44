//! Procedural motion for floating text labels.
//!
//! Each label gets one of six motion patterns and moves in two layers:
//! - [`generate`] draws immutable [`MotionParameters`] once per label
//! - [`step`] drifts the label's [`Kinematics`] on a fixed tick, reflecting
//!   elastically off the walls of its drift class
//! - [`place`] overlays the pattern's oscillation for the elapsed time and
//!   clamps the result to the render bounds
//!
//! Coordinates are percent of the field on both axes, so a renderer only has
//! to map `0..100` onto its canvas.
//!
//! # Example
//!
//! ```
//! use marquee_motion::{MotionConfig, generate, place, step};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = MotionConfig::default();
//! let params = generate(&config, &mut StdRng::seed_from_u64(7));
//! let mut kinematics = params.kinematics(&config);
//!
//! // Twenty ticks at 20 Hz
//! for _ in 0..20 {
//!     step(params.pattern, &mut kinematics, 0.05, &config);
//! }
//!
//! let placement = place(&params, kinematics.position, 1.0, &config);
//! assert!(config.render_bounds.contains(placement.position));
//! ```

mod config;
mod generate;
mod integrate;
mod pattern;
mod sample;

pub use config::{ConfigError, DriftProfile, FieldBounds, MotionConfig, ValueRange};
pub use generate::{Kinematics, MotionParameters, generate, is_within_config};
pub use integrate::{Reflection, advance, reflect, step};
pub use pattern::{ColorTag, DriftClass, PatternKind};
pub use sample::{Placement, SPIRAL_MAX_RADIUS, elapsed_seconds, pattern_offset, place};
