//! Configuration management for pomo.
//!
//! Settings are stored as pretty-printed JSON in the platform data directory
//! (see [`DataStorage`]). A missing file is not an error: the application
//! runs with defaults until `pomo init` writes one.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\pomo\config.json`
//! - **macOS**: `~/Library/Application Support/pomo/config.json`
//! - **Linux**: `~/.local/share/pomo/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pomo::libs::config::Config;
//!
//! let config = Config::read()?;
//! let timer = config.timer.unwrap_or_default();
//! println!("Default cycle length: {} minutes", timer.default_minutes);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::cycle::{MAX_MINUTES, MIN_MINUTES};
use crate::libs::messages::Message;
use crate::libs::scheduler::DEFAULT_TICK_INTERVAL;
use crate::libs::store::DEFAULT_EVENT_CAPACITY;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::time::Duration;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Timer behaviour settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    /// Cycle length in minutes offered by default in the new-cycle prompt.
    ///
    /// Must lie within the same bounds enforced on every cycle (5 to 60).
    pub default_minutes: u32,

    /// Wake period of the countdown driver in milliseconds.
    ///
    /// Elapsed time is always derived from timestamps, so this only affects
    /// how often the countdown refreshes, not its accuracy.
    pub tick_interval_ms: u64,

    /// Buffer size of the change notification channel.
    pub event_capacity: usize,
}

impl Default for TimerConfig {
    /// 5 minute cycles, one wake per second, 64 buffered events.
    fn default() -> Self {
        TimerConfig {
            default_minutes: MIN_MINUTES,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl TimerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&self.default_minutes) {
            msg_bail_anyhow!(Message::ConfigDefaultMinutesOutOfRange(self.default_minutes));
        }
        if self.tick_interval_ms == 0 {
            msg_bail_anyhow!(Message::ConfigTickIntervalZero);
        }
        if self.event_capacity == 0 {
            msg_bail_anyhow!(Message::ConfigEventCapacityZero);
        }
        Ok(())
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Timer settings. Omitted from the file until configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, replacing any existing file.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Timer settings, defaulted and validated.
    pub fn timer(&self) -> Result<TimerConfig> {
        let timer = self.timer.clone().unwrap_or_default();
        timer.validate()?;
        Ok(timer)
    }

    /// Runs the interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.timer.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleTimer);
        let timer = TimerConfig {
            default_minutes: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDefaultMinutes.to_string())
                .default(default.default_minutes)
                .validate_with(|minutes: &u32| -> Result<(), String> {
                    if (MIN_MINUTES..=MAX_MINUTES).contains(minutes) {
                        Ok(())
                    } else {
                        Err(Message::ConfigDefaultMinutesOutOfRange(*minutes).to_string())
                    }
                })
                .interact_text()?,

            tick_interval_ms: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTickInterval.to_string())
                .default(default.tick_interval_ms)
                .interact_text()?,

            event_capacity: default.event_capacity,
        };
        timer.validate()?;
        config.timer = Some(timer);

        Ok(config)
    }
}
