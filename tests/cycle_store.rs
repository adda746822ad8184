#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Local, TimeZone};
    use pomo::libs::clock::{Clock, ManualClock};
    use pomo::libs::cycle::{CycleStatus, ValidationError};
    use pomo::libs::store::{CycleEvent, CycleStore};
    use std::sync::Arc;
    use test_context::{test_context, TestContext};

    /// A store driven by a manual clock starting at a fixed instant.
    struct StoreTestContext {
        clock: Arc<ManualClock>,
        start: DateTime<Local>,
        store: CycleStore,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let start = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
            let clock = Arc::new(ManualClock::new(start));
            let store = CycleStore::new(clock.clone());
            StoreTestContext { clock, start, store }
        }
    }

    impl StoreTestContext {
        fn assert_invariants(&self) {
            let history = self.store.history();
            for cycle in &history {
                assert!(
                    cycle.finished_at().is_none() || cycle.interrupted_at().is_none(),
                    "cycle {} reached two terminal states",
                    cycle.id()
                );
                assert!((300..=3600).contains(&cycle.target_seconds()));
                assert!(!cycle.task().is_empty());
            }
            if let Some(active) = self.store.active_cycle() {
                assert!(!active.is_terminal());
                assert!(history.iter().any(|cycle| cycle.id() == active.id()));
            }
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_create_starts_now_and_becomes_active(ctx: &mut StoreTestContext) {
        for (task, minutes) in [("write spec", 5), ("deep work", 25), ("long haul", 60)] {
            ctx.clock.advance(Duration::seconds(7));
            let id = ctx.store.create_cycle(task, minutes).unwrap();

            let active = ctx.store.active_cycle().unwrap();
            assert_eq!(active.id(), id);
            assert_eq!(active.started_at(), ctx.clock.now());
            assert_eq!(active.finished_at(), None);
            assert_eq!(active.interrupted_at(), None);
            assert_eq!(active.target_seconds(), u64::from(minutes) * 60);
            assert_eq!(ctx.store.elapsed_seconds(), 0);
            ctx.assert_invariants();

            ctx.store.interrupt_active_cycle();
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_duration_below_minimum_is_rejected(ctx: &mut StoreTestContext) {
        let mut events = ctx.store.subscribe();

        assert_eq!(
            ctx.store.create_cycle("x", 4),
            Err(ValidationError::TooShort { minutes: 4 })
        );
        assert_eq!(
            ctx.store.create_cycle("x", 61),
            Err(ValidationError::TooLong { minutes: 61 })
        );
        assert_eq!(ctx.store.create_cycle(" \t", 25), Err(ValidationError::EmptyTask));

        assert!(ctx.store.history().is_empty());
        assert_eq!(ctx.store.active_cycle_id(), None);
        assert!(events.try_recv().is_err(), "rejected requests must not notify");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_task_label_is_stored_as_typed(ctx: &mut StoreTestContext) {
        let id = ctx.store.create_cycle("  review PR #42 ", 25).unwrap();
        assert_eq!(ctx.store.cycle(id).unwrap().task(), "  review PR #42 ");

        assert_eq!(ctx.store.create_cycle("\n  ", 25), Err(ValidationError::EmptyTask));
        assert_eq!(ctx.store.history().len(), 1);
        ctx.assert_invariants();
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_repeated_terminal_calls_change_nothing(ctx: &mut StoreTestContext) {
        ctx.store.create_cycle("draft", 10).unwrap();
        ctx.clock.advance(Duration::seconds(42));
        ctx.store.interrupt_active_cycle();
        let snapshot = ctx.store.history();

        ctx.clock.advance(Duration::seconds(10));
        ctx.store.interrupt_active_cycle();
        ctx.store.mark_active_cycle_finished();

        assert_eq!(ctx.store.history(), snapshot);
        assert_eq!(snapshot[0].interrupted_at(), Some(ctx.start + Duration::seconds(42)));
        assert_eq!(snapshot[0].finished_at(), None);
        ctx.assert_invariants();
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_history_keeps_creation_order(ctx: &mut StoreTestContext) {
        let mut created = Vec::new();
        for round in 0..6u32 {
            created.push(ctx.store.create_cycle(&format!("task {}", round), 5 + round).unwrap());
            ctx.clock.advance(Duration::seconds(30));
            match round % 3 {
                0 => ctx.store.mark_active_cycle_finished(),
                1 => ctx.store.interrupt_active_cycle(),
                _ => {}
            }
            ctx.assert_invariants();
        }

        let history = ctx.store.history();
        assert_eq!(history.len(), 6);
        assert_eq!(history.iter().map(|cycle| cycle.id()).collect::<Vec<_>>(), created);
        assert_eq!(
            history.iter().map(|cycle| cycle.task().to_string()).collect::<Vec<_>>(),
            (0..6).map(|round| format!("task {}", round)).collect::<Vec<_>>()
        );

        // Later terminal calls never reorder or drop entries.
        ctx.store.mark_active_cycle_finished();
        let after = ctx.store.history();
        assert_eq!(after.len(), 6);
        assert_eq!(after.iter().map(|cycle| cycle.id()).collect::<Vec<_>>(), created);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_second_create_leaves_first_cycle_running(ctx: &mut StoreTestContext) {
        let first = ctx.store.create_cycle("first", 25).unwrap();
        ctx.clock.advance(Duration::seconds(90));
        let second = ctx.store.create_cycle("second", 25).unwrap();

        assert_eq!(ctx.store.active_cycle_id(), Some(second));
        let first_cycle = ctx.store.cycle(first).unwrap();
        assert_eq!(first_cycle.status(), CycleStatus::InProgress);
        assert_eq!(first_cycle.interrupted_at(), None);
        assert_eq!(first_cycle.finished_at(), None);

        // Only an explicit call on the active cycle reaches a terminal state.
        ctx.store.interrupt_active_cycle();
        assert_eq!(ctx.store.cycle(second).unwrap().status(), CycleStatus::Interrupted);
        assert_eq!(ctx.store.cycle(first).unwrap().status(), CycleStatus::InProgress);
        assert_eq!(ctx.store.active_cycle_id(), None);
        ctx.assert_invariants();
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_set_elapsed_seconds_does_not_touch_cycles(ctx: &mut StoreTestContext) {
        let id = ctx.store.create_cycle("focus", 5).unwrap();
        let before = ctx.store.history();
        let mut events = ctx.store.subscribe();

        ctx.store.set_elapsed_seconds(120);

        assert_eq!(ctx.store.elapsed_seconds(), 120);
        assert_eq!(ctx.store.history(), before);
        assert_eq!(events.try_recv().unwrap(), CycleEvent::Elapsed { id, seconds: 120 });

        ctx.store.create_cycle("next", 5).unwrap();
        assert_eq!(ctx.store.elapsed_seconds(), 0);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_clones_share_one_session(ctx: &mut StoreTestContext) {
        let countdown_view = ctx.store.clone();
        let history_view = ctx.store.clone();

        let id = ctx.store.create_cycle("shared", 5).unwrap();
        assert_eq!(countdown_view.active_cycle_id(), Some(id));

        countdown_view.mark_active_cycle_finished();
        assert_eq!(history_view.history()[0].status(), CycleStatus::Finished);
        assert_eq!(ctx.store.active_cycle_id(), None);
    }
}
