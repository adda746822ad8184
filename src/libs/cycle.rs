//! Work cycle model.
//!
//! A [`Cycle`] is one requested work interval: a task label, a target
//! duration and the instants at which it started and, eventually, reached a
//! terminal state. Terminal states are exclusive and permanent, so the only
//! mutators on `Cycle` are crate-private and refuse to touch a cycle that
//! already finished or was interrupted.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Shortest cycle a user may request, in minutes.
pub const MIN_MINUTES: u32 = 5;
/// Longest cycle a user may request, in minutes.
pub const MAX_MINUTES: u32 = 60;

/// Rejection reasons for a cycle request. No state changes when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task name must not be empty")]
    EmptyTask,
    #[error("A cycle must last at least {min} minutes (got {minutes})", min = MIN_MINUTES)]
    TooShort { minutes: u32 },
    #[error("A cycle must last at most {max} minutes (got {minutes})", max = MAX_MINUTES)]
    TooLong { minutes: u32 },
}

/// Opaque cycle identifier derived from the creation instant in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CycleId(u64);

impl CycleId {
    /// Builds the id for a cycle created at `instant`, strictly greater than
    /// `previous` when one is given.
    pub(crate) fn next(instant: DateTime<Local>, previous: Option<CycleId>) -> Self {
        let millis = u64::try_from(instant.timestamp_millis()).unwrap_or(0);
        match previous {
            Some(CycleId(last)) if millis <= last => CycleId(last + 1),
            _ => CycleId(millis),
        }
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request for a new cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCycle {
    task: String,
    minutes: u32,
}

impl NewCycle {
    /// Validates the raw form input. A task made only of whitespace counts
    /// as empty; any other label is kept exactly as typed.
    pub fn new(task: &str, minutes: u32) -> Result<Self, ValidationError> {
        if task.trim().is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        if minutes < MIN_MINUTES {
            return Err(ValidationError::TooShort { minutes });
        }
        if minutes > MAX_MINUTES {
            return Err(ValidationError::TooLong { minutes });
        }
        Ok(Self {
            task: task.to_string(),
            minutes,
        })
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

/// Outcome of a cycle as shown in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CycleStatus {
    InProgress,
    Finished,
    Interrupted,
}

impl CycleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CycleStatus::InProgress => "In progress",
            CycleStatus::Finished => "Finished",
            CycleStatus::Interrupted => "Interrupted",
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One requested work interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    id: CycleId,
    task: String,
    minutes: u32,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
    interrupted_at: Option<DateTime<Local>>,
}

impl Cycle {
    pub(crate) fn start(id: CycleId, request: NewCycle, started_at: DateTime<Local>) -> Self {
        Self {
            id,
            task: request.task,
            minutes: request.minutes,
            started_at,
            finished_at: None,
            interrupted_at: None,
        }
    }

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Target duration in seconds, always within `[300, 3600]`.
    pub fn target_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Local>> {
        self.finished_at
    }

    pub fn interrupted_at(&self) -> Option<DateTime<Local>> {
        self.interrupted_at
    }

    /// Instant the cycle reached its terminal state, if it did.
    pub fn ended_at(&self) -> Option<DateTime<Local>> {
        self.finished_at.or(self.interrupted_at)
    }

    pub fn is_terminal(&self) -> bool {
        self.ended_at().is_some()
    }

    pub fn status(&self) -> CycleStatus {
        if self.finished_at.is_some() {
            CycleStatus::Finished
        } else if self.interrupted_at.is_some() {
            CycleStatus::Interrupted
        } else {
            CycleStatus::InProgress
        }
    }

    /// Whole seconds between the start and `now`, never negative.
    pub fn seconds_since_start(&self, now: DateTime<Local>) -> u64 {
        u64::try_from((now - self.started_at).num_seconds()).unwrap_or(0)
    }

    /// Returns `false` and leaves the cycle untouched if it is already terminal.
    pub(crate) fn finish(&mut self, at: DateTime<Local>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.finished_at = Some(at);
        true
    }

    /// Returns `false` and leaves the cycle untouched if it is already terminal.
    pub(crate) fn interrupt(&mut self, at: DateTime<Local>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.interrupted_at = Some(at);
        true
    }
}
