//! Store, stage and scheduling bundled behind one owner.
//!
//! Every mutation goes through `&mut Theater`, so inserting a label, evicting
//! the oldest one and syncing the live set happen as a single step; no tick
//! can observe the store and stage out of step.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, trace};

use crate::config::TheaterConfig;
use crate::error::{StageConfigError, StoreError};
use crate::stage::Stage;
use crate::state::RenderDescriptor;
use crate::store::{LabelId, LabelStore, StoreChange, SubscriptionId};
use crate::ticker::FixedTicker;

/// Message shown in the animation view when nothing is animating.
pub const EMPTY_STORE_MESSAGE: &str = "Go back and add some inputs to see animations!";

/// Message shown while labels exist but have not been animated yet.
pub const PENDING_MESSAGE: &str = "Animations will appear here...";

/// The animation view and its label store.
#[derive(Debug)]
pub struct Theater {
    config: TheaterConfig,
    store: LabelStore,
    stage: Stage,
    ticker: FixedTicker,
    rng: StdRng,
    view_open: bool,
}

impl Theater {
    /// Creates a theater seeded from system entropy.
    pub fn new(config: TheaterConfig) -> Result<Self, StageConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a theater with a fixed seed.
    pub fn with_seed(config: TheaterConfig, seed: u64) -> Result<Self, StageConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a theater drawing randomness from `rng`.
    pub fn with_rng(config: TheaterConfig, rng: StdRng) -> Result<Self, StageConfigError> {
        config.validate()?;
        Ok(Self {
            store: LabelStore::new(config.stage.capacity, config.stage.max_text_len),
            stage: Stage::new(config.motion.clone())?,
            ticker: FixedTicker::new(
                config.stage.tick_interval_ms,
                config.stage.max_catch_up_ticks,
            ),
            config,
            rng,
            view_open: false,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &TheaterConfig {
        &self.config
    }

    /// The label store.
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    /// The live animation set.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Returns true while the animation view is entered.
    pub fn is_view_open(&self) -> bool {
        self.view_open
    }

    /// Returns true if the integrator should be firing.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Registers a listener for store changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + Send + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Removes a store listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Adds a label, evicting the oldest when full, and syncs the live set.
    pub fn submit(&mut self, text: &str, now_ms: u64) -> Result<LabelId, StoreError> {
        let evicts = self.store.entries().next().filter(|_| self.store.is_full()).map(|e| e.id);
        let id = self.store.submit(text, now_ms)?;
        if let Some(old) = evicts {
            info!(evicted = %old, added = %id, "store full, evicted oldest label");
        } else {
            info!(added = %id, "label added");
        }
        self.refresh(now_ms);
        Ok(id)
    }

    /// Removes every label and stops the integrator.
    pub fn clear(&mut self) {
        info!(count = self.store.len(), "clearing labels");
        self.store.clear();
        self.stage.clear();
        self.ticker.disarm();
    }

    /// Enters the animation view; labels start animating.
    ///
    /// Labels animated before keep the motion recorded in the store.
    pub fn enter_view(&mut self, now_ms: u64) {
        if self.view_open {
            return;
        }
        self.view_open = true;
        info!(labels = self.store.len(), "entered animation view");
        self.refresh(now_ms);
    }

    /// Leaves the animation view; live states are dropped.
    pub fn leave_view(&mut self) {
        if !self.view_open {
            return;
        }
        self.view_open = false;
        info!("left animation view");
        self.stage.clear();
        self.ticker.disarm();
    }

    /// Runs one integrator tick with the configured `dt`.
    ///
    /// For external timers; does nothing while the live set is empty.
    pub fn tick(&mut self) {
        if self.stage.is_empty() {
            return;
        }
        trace!(labels = self.stage.len(), "integrator tick");
        self.stage.tick(self.ticker.dt());
    }

    /// Runs the ticks due at `now_ms` and returns how many ran.
    pub fn advance(&mut self, now_ms: u64) -> u32 {
        let due = self.ticker.advance(now_ms);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Runs the ticks due at `now_ms`, then samples every live label.
    pub fn frame(&mut self, now_ms: u64) -> Vec<RenderDescriptor> {
        self.advance(now_ms);
        self.render(now_ms)
    }

    /// Samples every live label without advancing the integrator.
    pub fn render(&self, now_ms: u64) -> Vec<RenderDescriptor> {
        self.stage.render(now_ms)
    }

    /// Status line for the view header.
    pub fn status_line(&self) -> String {
        format!(
            "Active animations: {}/{}",
            self.stage.len(),
            self.store.capacity()
        )
    }

    /// Placeholder text when nothing is animating, if any.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.stage.is_empty() {
            None
        } else if self.store.is_empty() {
            Some(EMPTY_STORE_MESSAGE)
        } else {
            Some(PENDING_MESSAGE)
        }
    }

    fn refresh(&mut self, now_ms: u64) {
        if !self.view_open {
            return;
        }
        self.stage.sync(
            &mut self.store,
            now_ms,
            self.config.stage.start_jitter_ms,
            &mut self.rng,
        );
        if self.stage.is_empty() {
            self.ticker.disarm();
        } else {
            self.ticker.arm(now_ms);
        }
    }
}
