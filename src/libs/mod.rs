//! Core library modules for the pomo application.
//!
//! ## Features
//!
//! - **Cycle Engine**: Clock abstraction, cycle model, in-memory store and tick scheduler
//! - **Session Facade**: One tracker per session wiring the store to its countdown driver
//! - **Presentation**: Countdown/duration formatting and the history table
//! - **Infrastructure**: Configuration, data directory resolution, messaging
//!
//! ## Usage
//!
//! ```rust
//! use pomo::libs::clock::ManualClock;
//! use pomo::libs::store::CycleStore;
//! use chrono::Local;
//! use std::sync::Arc;
//!
//! let store = CycleStore::new(Arc::new(ManualClock::new(Local::now())));
//! let id = store.create_cycle("Review pull requests", 25).unwrap();
//! assert_eq!(store.active_cycle_id(), Some(id));
//! ```

pub mod clock;
pub mod config;
pub mod cycle;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod scheduler;
pub mod store;
pub mod tracker;
pub mod view;
