//! Time formatting utilities for the countdown and the history view.
//!
//! This module turns second counts and cycle timestamps into the strings the
//! terminal front end shows. The arithmetic (floor division and modulo on
//! non-negative integers) is part of the engine's contract; the wording is
//! purely presentational.
//!
//! ## Format Specifications
//!
//! ### Countdown
//! Remaining time is shown as `MM:SS`:
//! - Minutes are `seconds / 60`, zero-padded to 2 digits
//! - Seconds are `seconds % 60`, zero-padded to 2 digits
//!
//! ### Durations
//! History durations are coarse and human-friendly:
//! - Under one minute → "0 minutes"
//! - One minute → "1 minute"
//! - Under an hour → "N minutes"
//! - Otherwise → "N hours M minutes" (minutes omitted when zero)
//!
//! ### Relative start
//! - Under one minute → "just now"
//! - Otherwise the duration wording followed by "ago"
//!
//! ## Examples
//!
//! ```rust
//! use pomo::libs::formatter::{format_countdown, split_seconds};
//!
//! assert_eq!(split_seconds(1499), (24, 59));
//! assert_eq!(format_countdown(1499), "24:59");
//! ```

use crate::libs::cycle::Cycle;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Placeholder for values that do not exist yet, such as the time spent on
/// a cycle that is still running.
pub const PLACEHOLDER: &str = "-";

/// A cycle pre-formatted for display or export.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormattedCycle {
    /// 1-based position in the history.
    pub index: usize,
    pub task: String,
    /// Target duration, e.g. "25 minutes".
    pub duration: String,
    /// Start relative to now, e.g. "12 minutes ago".
    pub started: String,
    /// Time between start and terminal state, or "-" while running.
    pub time_spent: String,
    pub status: String,
}

impl FormattedCycle {
    pub fn new(index: usize, cycle: &Cycle, now: DateTime<Local>) -> Self {
        Self {
            index,
            task: cycle.task().to_string(),
            duration: format_minutes(u64::from(cycle.minutes())),
            started: format_started(cycle.started_at(), now),
            time_spent: format_time_spent(cycle),
            status: cycle.status().to_string(),
        }
    }
}

/// Splits a second count into whole minutes and leftover seconds.
pub fn split_seconds(seconds: u64) -> (u64, u64) {
    (seconds / 60, seconds % 60)
}

/// Formats a second count as `MM:SS`.
///
/// Counts of 100 minutes or more simply widen the minutes field.
pub fn format_countdown(seconds: u64) -> String {
    let (minutes, seconds) = split_seconds(seconds);
    format!("{:02}:{:02}", minutes, seconds)
}

/// "1 minute", "N minutes" or "N hours M minutes".
pub fn format_minutes(minutes: u64) -> String {
    let unit = |count: u64, singular: &str| {
        if count == 1 {
            format!("1 {}", singular)
        } else {
            format!("{} {}s", count, singular)
        }
    };

    if minutes < 60 {
        return unit(minutes, "minute");
    }

    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        unit(hours, "hour")
    } else {
        format!("{} {}", unit(hours, "hour"), unit(rest, "minute"))
    }
}

/// Coarse wording for a second count; anything under a minute is "0 minutes".
pub fn format_elapsed(seconds: u64) -> String {
    format_minutes(seconds / 60)
}

/// Start instant relative to `now`.
pub fn format_started(started_at: DateTime<Local>, now: DateTime<Local>) -> String {
    let seconds = u64::try_from((now - started_at).num_seconds()).unwrap_or(0);
    if seconds < 60 {
        "just now".to_string()
    } else {
        format!("{} ago", format_elapsed(seconds))
    }
}

/// Time between the start and the terminal state of a cycle.
pub fn format_time_spent(cycle: &Cycle) -> String {
    match cycle.ended_at() {
        Some(ended_at) => format_elapsed(u64::try_from((ended_at - cycle.started_at()).num_seconds()).unwrap_or(0)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats a whole history in creation order.
pub fn format_history(cycles: &[Cycle], now: DateTime<Local>) -> Vec<FormattedCycle> {
    cycles
        .iter()
        .enumerate()
        .map(|(index, cycle)| FormattedCycle::new(index + 1, cycle, now))
        .collect()
}
