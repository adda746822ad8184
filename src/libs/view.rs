use super::cycle::{Cycle, CycleStatus};
use super::formatter::{format_history, FormattedCycle};
use super::messages::Message;
use crate::{msg_info, msg_print};
use chrono::{DateTime, Local};
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Builds the history table; kept separate from printing so it can be tested.
    pub fn history_table(cycles: &[Cycle], now: DateTime<Local>) -> Table {
        let mut table = Table::new();

        table.add_row(row!["#", "TASK", "DURATION", "STARTED", "TIME SPENT", "STATUS"]);
        for FormattedCycle {
            index,
            task,
            duration,
            started,
            time_spent,
            status,
        } in format_history(cycles, now)
        {
            table.add_row(row![index, task, duration, started, time_spent, status]);
        }

        table
    }

    pub fn history_summary(cycles: &[Cycle]) -> Message {
        let count = |status: CycleStatus| cycles.iter().filter(|cycle| cycle.status() == status).count();
        Message::HistorySummary {
            finished: count(CycleStatus::Finished),
            interrupted: count(CycleStatus::Interrupted),
            in_progress: count(CycleStatus::InProgress),
        }
    }

    pub fn history(cycles: &[Cycle], now: DateTime<Local>) {
        msg_print!(Message::HistoryHeader, true);
        if cycles.is_empty() {
            msg_info!(Message::HistoryEmpty);
            return;
        }
        Self::history_table(cycles, now).printstd();
        msg_print!(Self::history_summary(cycles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::clock::{Clock, ManualClock};
    use crate::libs::store::CycleStore;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    #[test]
    fn table_has_one_row_per_cycle_plus_header() {
        let clock = Arc::new(ManualClock::new(Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()));
        let store = CycleStore::new(clock.clone());
        store.create_cycle("first", 5).unwrap();
        clock.advance(Duration::minutes(3));
        store.interrupt_active_cycle();
        store.create_cycle("second", 25).unwrap();

        let history = store.history();
        let table = View::history_table(&history, clock.now());
        assert_eq!(table.len(), 3);

        let rendered = table.to_string();
        assert!(rendered.contains("Interrupted"));
        assert!(rendered.contains("3 minutes"));
        assert!(rendered.contains("In progress"));

        assert_eq!(
            View::history_summary(&history).to_string(),
            "0 finished, 1 interrupted, 1 in progress"
        );
    }
}
