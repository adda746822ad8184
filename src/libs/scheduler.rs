//! Periodic driver for the active cycle's countdown.
//!
//! While a cycle is active, a driver task wakes roughly once per tick
//! interval, derives the elapsed seconds from the clock (`now - started_at`,
//! never by counting wakes) and either publishes that value or completes the
//! cycle once its target duration is reached.
//!
//! ## Driver ownership
//!
//! A driver is armed for exactly one [`CycleId`] and is represented by a
//! [`TickHandle`] holding its cancellation token. [`TickScheduler::sync`]
//! compares the armed id with the store's active id and cancels the old
//! driver before arming a new one, so at most one driver is live. Drivers
//! also stop by themselves when their cycle completes or stops being the
//! active one, and every write they make is guarded by the cycle id.
//!
//! ```text
//!   Idle ──create──▶ Running ──elapsed >= target──▶ Completing ──▶ Idle
//!                      │  ▲
//!                      └──┘ publish elapsed
//! ```

use super::cycle::CycleId;
use super::store::CycleStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default wake period of a driver.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Result of evaluating one wake for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running; carries the elapsed seconds.
    Running(u64),
    /// Target reached; carries the clamped elapsed value (the target).
    Completed(u64),
    /// The cycle is no longer the active one.
    Stale,
}

/// Computes what a wake for `id` should do without changing any state.
pub fn evaluate(store: &CycleStore, id: CycleId) -> TickOutcome {
    let Some(cycle) = store.active_cycle().filter(|cycle| cycle.id() == id) else {
        return TickOutcome::Stale;
    };

    let elapsed = cycle.seconds_since_start(store.now());
    let target = cycle.target_seconds();
    if elapsed >= target {
        TickOutcome::Completed(target)
    } else {
        TickOutcome::Running(elapsed)
    }
}

/// Evaluates one wake for `id` and applies it to the store.
///
/// The store re-checks that `id` is still active under its lock, so a wake
/// racing with an interrupt reports [`TickOutcome::Stale`] instead of writing.
pub fn tick(store: &CycleStore, id: CycleId) -> TickOutcome {
    match evaluate(store, id) {
        TickOutcome::Running(elapsed) if store.publish_elapsed_if_active(id, elapsed) => TickOutcome::Running(elapsed),
        TickOutcome::Completed(target) if store.complete_if_active(id) => TickOutcome::Completed(target),
        _ => TickOutcome::Stale,
    }
}

/// Handle to a driver armed for one cycle. Dropping it cancels the driver.
#[derive(Debug)]
pub struct TickHandle {
    cycle_id: CycleId,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the driver task has exited, by cancellation or on its own.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Keeps exactly one driver tied to the store's active cycle.
pub struct TickScheduler {
    store: CycleStore,
    period: Duration,
    armed: Option<TickHandle>,
}

impl TickScheduler {
    /// A zero `period` falls back to [`DEFAULT_TICK_INTERVAL`], since a
    /// driver cannot wake with no delay between ticks.
    pub fn new(store: CycleStore, period: Duration) -> Self {
        let period = if period.is_zero() {
            debug!("zero tick period replaced by the default");
            DEFAULT_TICK_INTERVAL
        } else {
            period
        };
        Self {
            store,
            period,
            armed: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns a driver for `id` on the current tokio runtime.
    ///
    /// The returned handle is independent of the scheduler's own bookkeeping;
    /// use [`TickScheduler::sync`] to have the scheduler manage it.
    pub fn arm(&self, id: CycleId) -> TickHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(drive(self.store.clone(), id, self.period, token.clone()));
        debug!(%id, period_ms = self.period.as_millis() as u64, "tick driver armed");
        TickHandle { cycle_id: id, token, task }
    }

    /// Re-arms the driver if the active cycle changed since the last call.
    ///
    /// The previous driver is always cancelled before a new one is armed.
    pub fn sync(&mut self) {
        let active = self.store.active_cycle_id();
        if self.armed_cycle() == active {
            return;
        }

        self.cancel();
        if let Some(id) = active {
            self.armed = Some(self.arm(id));
        }
    }

    /// Cancels the current driver, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.armed.take() {
            debug!(id = %handle.cycle_id(), "tick driver cancelled");
            handle.cancel();
        }
    }

    /// Cycle the current driver was armed for, whether or not it is still running.
    pub fn armed_cycle(&self) -> Option<CycleId> {
        self.armed.as_ref().map(TickHandle::cycle_id)
    }

    /// Whether a driver is currently live.
    pub fn is_armed(&self) -> bool {
        self.armed.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

async fn drive(store: CycleStore, id: CycleId, period: Duration, token: CancellationToken) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of an interval completes immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(%id, "tick driver stopped by cancellation");
                return;
            }
            _ = interval.tick() => {
                match tick(&store, id) {
                    TickOutcome::Running(_) => {}
                    TickOutcome::Completed(target) => {
                        debug!(%id, target, "tick driver finished its cycle");
                        return;
                    }
                    TickOutcome::Stale => {
                        debug!(%id, "tick driver found its cycle inactive");
                        return;
                    }
                }
            }
        }
    }
}
