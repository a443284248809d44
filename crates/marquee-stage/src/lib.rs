//! Live label animations for marquee.
//!
//! Ties the motion engine to a capped label store:
//! - [`LabelStore`] - insertion-ordered ring buffer of submitted labels
//! - [`Stage`] - the live [`LabelAnimationState`]s mirrored from the store
//! - [`FixedTicker`] - turns frame timestamps into fixed integrator ticks
//! - [`Theater`] - owns store, stage and ticker so every change is atomic
//! - [`SharedTheater`] / [`IntegratorThread`] - mutex-guarded variant driven
//!   by a background thread
//!
//! # Example
//!
//! ```
//! use marquee_stage::{Theater, TheaterConfig};
//!
//! let mut theater = Theater::with_seed(TheaterConfig::default(), 42).unwrap();
//! theater.submit("hello", 0).unwrap();
//! theater.enter_view(0);
//!
//! // One render frame every ~16ms; the integrator runs every 50ms.
//! for frame in 1..=60 {
//!     let descriptors = theater.frame(frame * 16);
//!     assert_eq!(descriptors.len(), 1);
//! }
//! ```

mod clock;
mod config;
mod driver;
mod error;
mod stage;
mod state;
mod store;
mod theater;
mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{MAX_CAPACITY, StageConfig, TheaterConfig};
pub use driver::{IntegratorThread, SharedTheater};
pub use error::{StageConfigError, StoreError};
pub use stage::Stage;
pub use state::{LabelAnimationState, RenderDescriptor};
pub use store::{LabelEntry, LabelId, LabelStore, StoreChange, SubscriptionId};
pub use theater::{EMPTY_STORE_MESSAGE, PENDING_MESSAGE, Theater};
pub use ticker::FixedTicker;
