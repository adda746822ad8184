//! Interactive session: run several cycles and review their history.
//!
//! History lives in memory for as long as the session runs and is discarded
//! when it ends.

use super::start::run_cycle;
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::cycle::{NewCycle, MAX_MINUTES, MIN_MINUTES};
use crate::libs::messages::Message;
use crate::libs::tracker::CycleTracker;
use crate::libs::view::View;
use crate::{msg_error, msg_info};
use anyhow::Result;
use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::sync::Arc;

const ACTION_NEW_CYCLE: usize = 0;
const ACTION_HISTORY: usize = 1;

pub async fn cmd() -> Result<()> {
    let timer = Config::read()?.timer()?;
    let mut tracker = CycleTracker::new(Arc::new(SystemClock), &timer);

    let actions = [
        Message::SessionActionNewCycle.to_string(),
        Message::SessionActionHistory.to_string(),
        Message::SessionActionQuit.to_string(),
    ];

    loop {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSessionAction.to_string())
            .items(&actions)
            .default(ACTION_NEW_CYCLE)
            .interact()?;

        match selection {
            ACTION_NEW_CYCLE => {
                let request = prompt_cycle(timer.default_minutes)?;
                run_cycle(&mut tracker, request.task(), request.minutes()).await?;
            }
            ACTION_HISTORY => View::history(&tracker.history(), Local::now()),
            _ => break,
        }
    }

    msg_info!(Message::SessionEnded);
    Ok(())
}

/// Asks for a task and a duration until both are valid.
fn prompt_cycle(default_minutes: u32) -> Result<NewCycle> {
    loop {
        let task: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskName.to_string())
            .allow_empty(true)
            .interact_text()?;

        let minutes: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCycleMinutes.to_string())
            .default(default_minutes.clamp(MIN_MINUTES, MAX_MINUTES))
            .interact_text()?;

        match NewCycle::new(&task, minutes) {
            Ok(request) => return Ok(request),
            Err(error) => msg_error!(Message::CycleInvalid(error.to_string())),
        }
    }
}
