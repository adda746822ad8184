//! Session facade tying the cycle store to its tick scheduler.
//!
//! The front end never mutates the store directly for create/interrupt: it
//! goes through [`CycleTracker`], which re-syncs the scheduler right after
//! each mutation so the countdown driver always belongs to the active cycle.
//!
//! ```rust,no_run
//! use pomo::libs::clock::SystemClock;
//! use pomo::libs::config::TimerConfig;
//! use pomo::libs::tracker::CycleTracker;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut tracker = CycleTracker::new(Arc::new(SystemClock), &TimerConfig::default());
//! tracker.create_cycle("Write the release notes", 25)?;
//! println!("{}", tracker.countdown());
//! tracker.interrupt_active_cycle();
//! # Ok(())
//! # }
//! ```

use super::clock::Clock;
use super::config::TimerConfig;
use super::cycle::{Cycle, CycleId, ValidationError};
use super::formatter::format_countdown;
use super::scheduler::TickScheduler;
use super::store::{CycleEvent, CycleStore};
use std::sync::Arc;
use tokio::sync::broadcast;

/// One timer session: a store, its scheduler and nothing else.
///
/// Must be driven from inside a tokio runtime, since arming a countdown
/// spawns a task.
pub struct CycleTracker {
    store: CycleStore,
    scheduler: TickScheduler,
}

impl CycleTracker {
    pub fn new(clock: Arc<dyn Clock>, config: &TimerConfig) -> Self {
        let store = CycleStore::with_capacity(clock, config.event_capacity);
        Self::with_store(store, config)
    }

    pub fn with_store(store: CycleStore, config: &TimerConfig) -> Self {
        let scheduler = TickScheduler::new(store.clone(), config.tick_interval());
        Self { store, scheduler }
    }

    /// Read access for views; clones share the same session state.
    pub fn store(&self) -> &CycleStore {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CycleEvent> {
        self.store.subscribe()
    }

    /// Starts a new cycle and arms its countdown.
    ///
    /// A cycle that was still active keeps its in-progress status; only its
    /// countdown driver is cancelled.
    pub fn create_cycle(&mut self, task: &str, minutes: u32) -> Result<CycleId, ValidationError> {
        let id = self.store.create_cycle(task, minutes)?;
        self.scheduler.sync();
        Ok(id)
    }

    pub fn interrupt_active_cycle(&mut self) {
        self.store.interrupt_active_cycle();
        self.scheduler.sync();
    }

    pub fn mark_active_cycle_finished(&mut self) {
        self.store.mark_active_cycle_finished();
        self.scheduler.sync();
    }

    /// Re-syncs the scheduler after the store was changed from elsewhere.
    pub fn sync(&mut self) {
        self.scheduler.sync();
    }

    pub fn active_cycle(&self) -> Option<Cycle> {
        self.store.active_cycle()
    }

    pub fn history(&self) -> Vec<Cycle> {
        self.store.history()
    }

    pub fn is_counting_down(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Seconds left on the active cycle based on the last published elapsed value.
    pub fn remaining_seconds(&self) -> u64 {
        self.store
            .active_with_elapsed()
            .map(|(cycle, elapsed)| cycle.target_seconds().saturating_sub(elapsed))
            .unwrap_or(0)
    }

    /// Remaining time as `MM:SS`, `00:00` when idle.
    pub fn countdown(&self) -> String {
        format_countdown(self.remaining_seconds())
    }
}

impl Drop for CycleTracker {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}
