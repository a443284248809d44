//! Background integrator thread.
//!
//! [`SharedTheater`] guards a [`Theater`] with one mutex. The integrator
//! thread holds the lock only for a single batch update; it sleeps between
//! ticks and parks on a condition variable while nothing is animating, both
//! without holding the lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::state::RenderDescriptor;
use crate::store::LabelId;
use crate::theater::Theater;

struct Shared {
    theater: Mutex<Theater>,
    wake: Condvar,
    shutdown: AtomicBool,
}

/// A [`Theater`] that can be driven from several threads.
#[derive(Clone)]
pub struct SharedTheater {
    shared: Arc<Shared>,
}

impl SharedTheater {
    /// Wraps a theater.
    pub fn new(theater: Theater) -> Self {
        Self {
            shared: Arc::new(Shared {
                theater: Mutex::new(theater),
                wake: Condvar::new(),
                shutdown: AtomicBool::new(false),
            }),
        }
    }

    /// Locks the theater for direct access. Poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, Theater> {
        self.shared
            .theater
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a label and wakes the integrator.
    pub fn submit(&self, text: &str, now_ms: u64) -> Result<LabelId, StoreError> {
        let id = self.lock().submit(text, now_ms)?;
        self.shared.wake.notify_all();
        Ok(id)
    }

    /// Removes every label.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Enters the animation view and wakes the integrator.
    pub fn enter_view(&self, now_ms: u64) {
        self.lock().enter_view(now_ms);
        self.shared.wake.notify_all();
    }

    /// Leaves the animation view.
    pub fn leave_view(&self) {
        self.lock().leave_view();
    }

    /// Samples every live label.
    pub fn render(&self, now_ms: u64) -> Vec<RenderDescriptor> {
        self.lock().render(now_ms)
    }
}

/// Handle to a running integrator thread. Stops the thread on drop.
pub struct IntegratorThread {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<u64>>,
}

impl IntegratorThread {
    /// Starts ticking `theater` at its configured interval.
    pub fn spawn<C>(theater: &SharedTheater, clock: C) -> std::io::Result<Self>
    where
        C: Clock + 'static,
    {
        let shared = Arc::clone(&theater.shared);
        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("marquee-integrator".into())
            .spawn(move || run(&worker, &clock))?;
        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Stops the thread and returns how many ticks it ran.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        // Take the lock so the flag cannot slip between the worker's check
        // and its wait.
        drop(self.shared.theater.lock().unwrap_or_else(PoisonError::into_inner));
        self.shared.wake.notify_all();
        self.handle
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for IntegratorThread {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

fn run(shared: &Shared, clock: &dyn Clock) -> u64 {
    let mut ticks = 0;
    info!("integrator started");

    loop {
        let interval = {
            let mut theater = shared
                .theater
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            while !theater.is_ticking() && !shared.shutdown.load(Ordering::SeqCst) {
                debug!("nothing to animate, integrator parked");
                theater = shared
                    .wake
                    .wait(theater)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if shared.shutdown.load(Ordering::SeqCst) {
                break;
            }

            let due = theater.advance(clock.now_ms());
            ticks += u64::from(due);
            theater.config().stage.tick_interval_ms
        };

        thread::sleep(Duration::from_millis(interval));
    }

    info!(ticks, "integrator stopped");
    ticks
}
