//! Runs one cycle with a live countdown.
//!
//! The countdown redraws on every elapsed update published by the tick
//! driver. Ctrl-C interrupts the cycle instead of killing the process, so
//! the history table is still printed at the end.

use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::cycle::{CycleId, CycleStatus};
use crate::libs::messages::macros::is_debug_mode;
use crate::libs::messages::Message;
use crate::libs::store::CycleEvent;
use crate::libs::tracker::CycleTracker;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_debug, msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// What you are working on
    #[arg(required = true)]
    task: String,
    /// Cycle length in minutes (5-60); defaults to the configured value
    #[arg(short, long)]
    minutes: Option<u32>,
}

pub async fn cmd(start_args: StartArgs) -> Result<()> {
    let timer = Config::read()?.timer()?;
    let minutes = start_args.minutes.unwrap_or(timer.default_minutes);

    let mut tracker = CycleTracker::new(Arc::new(SystemClock), &timer);
    run_cycle(&mut tracker, &start_args.task, minutes).await?;

    View::history(&tracker.history(), Local::now());
    Ok(())
}

/// Starts a cycle and waits until it finishes or Ctrl-C interrupts it.
///
/// Also returns once the cycle stops being the active one for any other
/// reason, such as a newer cycle created through a clone of the store.
pub async fn run_cycle(tracker: &mut CycleTracker, task: &str, minutes: u32) -> Result<CycleStatus> {
    let mut events = tracker.subscribe();
    let id = match tracker.create_cycle(task, minutes) {
        Ok(id) => id,
        Err(error) => msg_bail_anyhow!(Message::CycleInvalid(error.to_string())),
    };
    let task = tracker.store().cycle(id).map(|cycle| cycle.task().to_string()).unwrap_or_default();

    msg_success!(Message::CycleStarted {
        task: task.clone(),
        minutes
    });
    msg_info!(Message::InterruptHint);
    render_countdown(&task, tracker.countdown());

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listening = true;

    loop {
        tokio::select! {
            result = &mut ctrl_c, if listening => {
                listening = false;
                match result {
                    Ok(()) => tracker.interrupt_active_cycle(),
                    Err(e) => msg_warning!(Message::CtrlCListenFailed(e.to_string())),
                }
            }
            event = events.recv() => match event {
                Ok(CycleEvent::Elapsed { id: event_id, .. }) if event_id == id => {
                    render_countdown(&task, tracker.countdown());
                }
                Ok(CycleEvent::Finished(event_id) | CycleEvent::Interrupted(event_id)) if event_id == id => break,
                // Skipped events may have included this cycle's terminal one.
                Ok(_) | Err(RecvError::Lagged(_)) if is_settled(tracker, id) => break,
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    }
    if !is_debug_mode() {
        println!();
    }

    Ok(report_outcome(tracker, id, &task))
}

/// Whether `id` is no longer the active cycle.
fn is_settled(tracker: &CycleTracker, id: CycleId) -> bool {
    tracker.store().active_cycle_id() != Some(id)
}

fn render_countdown(task: &str, remaining: String) {
    let line = Message::Countdown {
        task: task.to_string(),
        remaining,
    };
    if is_debug_mode() {
        msg_debug!(line);
    } else {
        print!("\r{}", line);
        let _ = io::stdout().flush();
    }
}

fn report_outcome(tracker: &CycleTracker, id: CycleId, task: &str) -> CycleStatus {
    let status = tracker
        .store()
        .cycle(id)
        .map(|cycle| cycle.status())
        .unwrap_or(CycleStatus::InProgress);

    match status {
        CycleStatus::Finished => msg_success!(Message::CycleFinished(task.to_string())),
        CycleStatus::Interrupted => msg_warning!(Message::CycleInterrupted(task.to_string())),
        CycleStatus::InProgress => msg_warning!(Message::CycleReplaced(task.to_string())),
    }
    status
}
