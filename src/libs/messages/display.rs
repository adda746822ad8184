//! Display implementation for pomo messages.
//!
//! All message text is defined here, in one match, so wording stays
//! consistent and each new variant needs an explicit formatting decision.

use super::types::Message;
use crate::libs::cycle::{MAX_MINUTES, MIN_MINUTES};
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CYCLE MESSAGES ===
            Message::CycleStarted { task, minutes } => format!("Started '{}' for {} minutes", task, minutes),
            Message::CycleFinished(task) => format!("Cycle '{}' finished. Time for a break!", task),
            Message::CycleInterrupted(task) => format!("Cycle '{}' interrupted", task),
            Message::CycleInvalid(error) => format!("Cannot start cycle: {}", error),
            Message::CycleReplaced(task) => format!("Cycle '{}' is still in progress and was left running in the history", task),
            Message::Countdown { task, remaining } => format!("{} - {}", remaining, task),
            Message::InterruptHint => "Press Ctrl-C to interrupt the cycle".to_string(),

            // === HISTORY MESSAGES ===
            Message::HistoryHeader => "My history".to_string(),
            Message::HistoryEmpty => "No cycles yet in this session".to_string(),
            Message::HistorySummary {
                finished,
                interrupted,
                in_progress,
            } => format!(
                "{} finished, {} interrupted, {} in progress",
                finished, interrupted, in_progress
            ),

            // === SESSION MESSAGES ===
            Message::SessionActionNewCycle => "Start a new cycle".to_string(),
            Message::SessionActionHistory => "Show history".to_string(),
            Message::SessionActionQuit => "Quit".to_string(),
            Message::SessionEnded => "Session ended. History is discarded on exit.".to_string(),
            Message::CtrlCListenFailed(error) => format!("Failed to listen for Ctrl-C: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleTimer => "Timer settings".to_string(),
            Message::ConfigDefaultMinutesOutOfRange(minutes) => format!(
                "Default cycle length must be between {} and {} minutes (got {})",
                MIN_MINUTES, MAX_MINUTES, minutes
            ),
            Message::ConfigTickIntervalZero => "Tick interval must be greater than zero".to_string(),
            Message::ConfigEventCapacityZero => "Event capacity must be greater than zero".to_string(),

            // === PROMPTS ===
            Message::PromptTaskName => "What are you working on".to_string(),
            Message::PromptCycleMinutes => format!("For how many minutes ({}-{})", MIN_MINUTES, MAX_MINUTES),
            Message::PromptSessionAction => "What next".to_string(),
            Message::PromptDefaultMinutes => "Default cycle length in minutes".to_string(),
            Message::PromptTickInterval => "Countdown refresh interval in milliseconds".to_string(),
        };

        write!(f, "{}", text)
    }
}
