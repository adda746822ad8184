#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone};
    use pomo::commands::start::run_cycle;
    use pomo::libs::clock::ManualClock;
    use pomo::libs::config::TimerConfig;
    use pomo::libs::cycle::CycleStatus;
    use pomo::libs::tracker::CycleTracker;
    use std::sync::Arc;
    use test_context::{test_context, AsyncTestContext};
    use tokio::time::{self, Duration};

    /// Upper bound for one `run_cycle` call; paused time makes it free to wait on.
    const RUN_LIMIT: Duration = Duration::from_secs(120);

    struct CommandTestContext {
        clock: Arc<ManualClock>,
        start: DateTime<Local>,
    }

    impl AsyncTestContext for CommandTestContext {
        async fn setup() -> Self {
            let start = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
            CommandTestContext {
                clock: Arc::new(ManualClock::new(start)),
                start,
            }
        }
    }

    impl CommandTestContext {
        fn tracker(&self, event_capacity: usize) -> CycleTracker {
            let timer = TimerConfig {
                event_capacity,
                ..Default::default()
            };
            CycleTracker::new(self.clock.clone(), &timer)
        }

        fn at(&self, seconds: i64) -> DateTime<Local> {
            self.start + ChronoDuration::seconds(seconds)
        }

        /// Moves the manual clock to `start + seconds` after `delay` of tokio time.
        fn jump_later(&self, delay: Duration, seconds: i64) {
            let clock = self.clock.clone();
            let target = self.at(seconds);
            tokio::spawn(async move {
                time::sleep(delay).await;
                clock.set(target);
            });
        }
    }

    #[test_context(CommandTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_returns_when_countdown_ends(ctx: &mut CommandTestContext) {
        let mut tracker = ctx.tracker(TimerConfig::default().event_capacity);
        ctx.jump_later(Duration::from_millis(1500), 300);

        let status = time::timeout(RUN_LIMIT, run_cycle(&mut tracker, "write spec", 5))
            .await
            .expect("countdown never ended")
            .unwrap();

        assert_eq!(status, CycleStatus::Finished);
        let history = tracker.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].finished_at(), Some(ctx.at(300)));
        assert_eq!(tracker.store().elapsed_seconds(), 300);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_with_single_slot_event_buffer(ctx: &mut CommandTestContext) {
        let mut tracker = ctx.tracker(1);
        // Several wakes publish before the loop catches up on the last one.
        for (step, seconds) in [(1500, 60), (2500, 120), (3500, 1200)] {
            ctx.jump_later(Duration::from_millis(step), seconds);
        }

        let status = time::timeout(RUN_LIMIT, run_cycle(&mut tracker, "tiny buffer", 20))
            .await
            .expect("finish went unnoticed")
            .unwrap();

        assert_eq!(status, CycleStatus::Finished);
        assert_eq!(tracker.store().active_cycle_id(), None);
        assert_eq!(tracker.store().elapsed_seconds(), 1200);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_returns_on_interrupt(ctx: &mut CommandTestContext) {
        let mut tracker = ctx.tracker(TimerConfig::default().event_capacity);
        let store = tracker.store().clone();
        let clock = ctx.clock.clone();
        let interrupt_at = ctx.at(42);
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(2500)).await;
            clock.set(interrupt_at);
            store.interrupt_active_cycle();
        });

        let status = time::timeout(RUN_LIMIT, run_cycle(&mut tracker, "draft", 10))
            .await
            .expect("interrupt went unnoticed")
            .unwrap();

        assert_eq!(status, CycleStatus::Interrupted);
        let cycle = &tracker.history()[0];
        assert_eq!(cycle.interrupted_at(), Some(ctx.at(42)));
        assert_eq!(cycle.finished_at(), None);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_ignores_other_cycles_until_replaced(ctx: &mut CommandTestContext) {
        let mut tracker = ctx.tracker(TimerConfig::default().event_capacity);
        let store = tracker.store().clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(1500)).await;
            store.create_cycle("elsewhere", 25).unwrap();
        });

        let status = time::timeout(RUN_LIMIT, run_cycle(&mut tracker, "mine", 5))
            .await
            .expect("replacement went unnoticed")
            .unwrap();

        // The replaced cycle keeps its in-progress status.
        assert_eq!(status, CycleStatus::InProgress);
        let history = tracker.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].task(), "mine");
        assert_eq!(tracker.store().active_cycle_id(), Some(history[1].id()));
    }

    #[test_context(CommandTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_rejects_invalid_input(ctx: &mut CommandTestContext) {
        let mut tracker = ctx.tracker(TimerConfig::default().event_capacity);

        let error = run_cycle(&mut tracker, "too short", 4).await.unwrap_err();
        assert!(error.to_string().contains("at least 5 minutes"));

        let error = run_cycle(&mut tracker, "   ", 25).await.unwrap_err();
        assert!(error.to_string().contains("must not be empty"));

        assert!(tracker.history().is_empty());
        assert!(!tracker.is_counting_down());
    }
}
