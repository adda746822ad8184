//! # Pomo - Pomodoro work-cycle tracker
//!
//! A command-line utility for running timed work cycles and reviewing the
//! history of a session.
//!
//! ## Features
//!
//! - **Cycle Engine**: At most one active cycle, finished or interrupted exactly once
//! - **Drift-free Countdown**: Elapsed time derived from timestamps, not from counted ticks
//! - **Session History**: Append-only, in-memory list of every cycle with its outcome
//! - **Interactive Sessions**: Prompt-driven loop for running cycles back to back
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pomo::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
