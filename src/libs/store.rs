//! In-memory store of work cycles.
//!
//! [`CycleStore`] owns the session history, the identity of the active cycle
//! and the elapsed-seconds value published for the countdown. It is a cheap
//! cloneable handle: every clone points at the same state, which is how the
//! countdown, the history view and the tick scheduler share one session.
//!
//! ## Consistency
//!
//! Each operation takes the internal lock exactly once, so readers see either
//! the state before or after a mutation, never a mix. Change notifications
//! are broadcast after the lock is released.
//!
//! ## Active cycle policy
//!
//! Creating a cycle while another one is active does not interrupt the
//! previous cycle. It simply stops being the active one and keeps its
//! in-progress status in the history; interrupting or finishing it first is
//! the caller's job.

use super::clock::Clock;
use super::cycle::{Cycle, CycleId, NewCycle, ValidationError};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Default capacity of the change notification channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Change notification sent to subscribers after a mutation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    Created(CycleId),
    Finished(CycleId),
    Interrupted(CycleId),
    Elapsed { id: CycleId, seconds: u64 },
}

#[derive(Debug, Default)]
struct StoreState {
    cycles: Vec<Cycle>,
    active: Option<CycleId>,
    elapsed_seconds: u64,
}

impl StoreState {
    fn position(&self, id: CycleId) -> Option<usize> {
        self.cycles.iter().rposition(|cycle| cycle.id() == id)
    }

    fn active_cycle(&self) -> Option<&Cycle> {
        let id = self.active?;
        self.position(id).map(|index| &self.cycles[index])
    }

    fn active_cycle_mut(&mut self) -> Option<&mut Cycle> {
        let id = self.active?;
        let index = self.position(id)?;
        Some(&mut self.cycles[index])
    }
}

/// Shared handle to the session's cycles.
#[derive(Clone)]
pub struct CycleStore {
    state: Arc<Mutex<StoreState>>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<CycleEvent>,
}

impl CycleStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity(clock, DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_capacity(clock: Arc<dyn Clock>, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            clock,
            events,
        }
    }

    /// Current instant according to the store's clock.
    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Subscribes to change notifications from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<CycleEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: CycleEvent) {
        // No receivers is fine: nobody is watching.
        let _ = self.events.send(event);
    }

    /// Appends a new cycle starting now and makes it the active one.
    ///
    /// Fails without touching any state when the task is blank or the
    /// duration is outside `[5, 60]` minutes.
    pub fn create_cycle(&self, task: &str, minutes: u32) -> Result<CycleId, ValidationError> {
        let request = NewCycle::new(task, minutes)?;
        let now = self.clock.now();

        let id = {
            let mut state = self.state.lock();
            let previous = state.cycles.last().map(Cycle::id);
            let id = CycleId::next(now, previous);
            if let Some(replaced) = state.active {
                debug!(%replaced, new = %id, "active cycle replaced without interruption");
            }
            state.cycles.push(Cycle::start(id, request, now));
            state.active = Some(id);
            state.elapsed_seconds = 0;
            id
        };

        debug!(%id, minutes, "cycle created");
        self.notify(CycleEvent::Created(id));
        Ok(id)
    }

    /// Marks the active cycle as finished. No-op when nothing is active.
    pub fn mark_active_cycle_finished(&self) {
        let now = self.clock.now();
        let finished = {
            let mut state = self.state.lock();
            let finished = state.active_cycle_mut().and_then(|cycle| cycle.finish(now).then(|| cycle.id()));
            if finished.is_some() {
                state.active = None;
            }
            finished
        };

        if let Some(id) = finished {
            debug!(%id, "cycle finished");
            self.notify(CycleEvent::Finished(id));
        }
    }

    /// Marks the active cycle as interrupted. No-op when nothing is active.
    pub fn interrupt_active_cycle(&self) {
        let now = self.clock.now();
        let interrupted = {
            let mut state = self.state.lock();
            let interrupted = state
                .active_cycle_mut()
                .and_then(|cycle| cycle.interrupt(now).then(|| cycle.id()));
            if interrupted.is_some() {
                state.active = None;
            }
            interrupted
        };

        if let Some(id) = interrupted {
            debug!(%id, "cycle interrupted");
            self.notify(CycleEvent::Interrupted(id));
        }
    }

    /// Overwrites the published elapsed seconds. Cycle data is not touched.
    pub fn set_elapsed_seconds(&self, seconds: u64) {
        let active = {
            let mut state = self.state.lock();
            state.elapsed_seconds = seconds;
            state.active
        };
        if let Some(id) = active {
            self.notify(CycleEvent::Elapsed { id, seconds });
        }
    }

    /// Publishes `seconds` only if `id` is still the active cycle.
    pub fn publish_elapsed_if_active(&self, id: CycleId, seconds: u64) -> bool {
        {
            let mut state = self.state.lock();
            if state.active != Some(id) {
                return false;
            }
            state.elapsed_seconds = seconds;
        }
        self.notify(CycleEvent::Elapsed { id, seconds });
        true
    }

    /// Finishes `id` and publishes its full target as elapsed, but only if it
    /// is still the active cycle. Returns whether the cycle was completed.
    ///
    /// Subscribers receive `Elapsed` with the target, then `Finished`.
    pub fn complete_if_active(&self, id: CycleId) -> bool {
        let now = self.clock.now();
        let target = {
            let mut state = self.state.lock();
            if state.active != Some(id) {
                return false;
            }
            let Some(cycle) = state.active_cycle_mut() else {
                return false;
            };
            let target = cycle.target_seconds();
            if !cycle.finish(now) {
                return false;
            }
            state.active = None;
            state.elapsed_seconds = target;
            target
        };

        debug!(%id, target, "cycle completed");
        // The terminal event goes last so a lagging receiver still sees it.
        self.notify(CycleEvent::Elapsed { id, seconds: target });
        self.notify(CycleEvent::Finished(id));
        true
    }

    pub fn active_cycle(&self) -> Option<Cycle> {
        self.state.lock().active_cycle().cloned()
    }

    pub fn active_cycle_id(&self) -> Option<CycleId> {
        self.state.lock().active
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.lock().elapsed_seconds
    }

    /// Active cycle together with its published elapsed seconds, read atomically.
    pub fn active_with_elapsed(&self) -> Option<(Cycle, u64)> {
        let state = self.state.lock();
        state.active_cycle().cloned().map(|cycle| (cycle, state.elapsed_seconds))
    }

    /// Snapshot of every cycle in creation order.
    pub fn history(&self) -> Vec<Cycle> {
        self.state.lock().cycles.clone()
    }

    pub fn cycle(&self, id: CycleId) -> Option<Cycle> {
        let state = self.state.lock();
        state.position(id).map(|index| state.cycles[index].clone())
    }

    /// Whole seconds since `id` started, measured on the store's clock.
    pub fn seconds_since_start(&self, id: CycleId) -> Option<u64> {
        let now = self.clock.now();
        self.cycle(id).map(|cycle| cycle.seconds_since_start(now))
    }
}
