//! User-facing messages.
//!
//! Every string printed by pomo is a [`Message`] variant rendered through its
//! `Display` implementation, and printed through the `msg_*` macros so debug
//! runs can route output into `tracing` instead of the console.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
