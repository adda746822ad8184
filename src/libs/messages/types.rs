//! Message catalogue for the application.
//!
//! Variants are grouped by the part of the application that emits them.
//! Parameters carry the dynamic parts of the text; the wording itself lives
//! in the `Display` implementation in [`super::display`].

#[derive(Debug, Clone)]
pub enum Message {
    // === CYCLE MESSAGES ===
    CycleStarted {
        task: String,
        minutes: u32,
    },
    CycleFinished(String),    // task
    CycleInterrupted(String), // task
    CycleInvalid(String),     // validation error
    CycleReplaced(String),    // task of the cycle left running
    Countdown {
        task: String,
        remaining: String,
    },
    InterruptHint,

    // === HISTORY MESSAGES ===
    HistoryHeader,
    HistoryEmpty,
    HistorySummary {
        finished: usize,
        interrupted: usize,
        in_progress: usize,
    },

    // === SESSION MESSAGES ===
    SessionActionNewCycle,
    SessionActionHistory,
    SessionActionQuit,
    SessionEnded,
    CtrlCListenFailed(String), // error

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleTimer,
    ConfigDefaultMinutesOutOfRange(u32),
    ConfigTickIntervalZero,
    ConfigEventCapacityZero,

    // === PROMPTS ===
    PromptTaskName,
    PromptCycleMinutes,
    PromptSessionAction,
    PromptDefaultMinutes,
    PromptTickInterval,
}
