use crate::error::{Result, SimError};
use crate::sim::{EventHandle, SimTime, Simulator, World};

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    Push(u32),
    PushThenScheduleNow { id: u32, next_id: u32 },
    ScheduleInPast,
}

#[derive(Default)]
struct DummyWorld {
    log: Vec<u32>,
    ticks: usize,
}

impl World for DummyWorld {
    type Action = TestAction;

    fn dispatch(&mut self, action: TestAction, sim: &mut Simulator<TestAction>) -> Result<()> {
        match action {
            TestAction::Push(id) => self.log.push(id),
            TestAction::PushThenScheduleNow { id, next_id } => {
                self.log.push(id);
                sim.schedule(sim.now(), TestAction::Push(next_id))?;
            }
            TestAction::ScheduleInPast => {
                sim.schedule(SimTime::ZERO, TestAction::Push(0))?;
            }
        }
        Ok(())
    }

    fn on_tick(&mut self, _sim: &mut Simulator<TestAction>) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime(10), TestAction::Push(1)).unwrap();
    sim.schedule(SimTime(5), TestAction::Push(2)).unwrap();
    sim.schedule(SimTime(10), TestAction::Push(3)).unwrap();

    let mut world = DummyWorld::default();
    sim.run(&mut world).unwrap();

    assert_eq!(world.log, [2, 1, 3]);
    assert_eq!(world.ticks, 3);
    assert_eq!(sim.now(), SimTime(10));
    assert_eq!(sim.events_executed(), 3);
}

#[test]
fn event_scheduled_at_same_time_inside_event_runs_after_current_event() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, TestAction::PushThenScheduleNow { id: 1, next_id: 2 })
        .unwrap();
    sim.schedule(SimTime::ZERO, TestAction::Push(3)).unwrap();

    let mut world = DummyWorld::default();
    sim.run(&mut world).unwrap();

    // 同一时刻内新调度的事件排在已有事件之后
    assert_eq!(world.log, [1, 3, 2]);
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn run_until_skips_events_after_until_and_advances_time() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, TestAction::Push(1)).unwrap();
    sim.schedule(SimTime(10), TestAction::Push(2)).unwrap();

    let mut world = DummyWorld::default();
    sim.run_until(SimTime(5), &mut world).unwrap();

    assert_eq!(world.log, [1]);
    assert_eq!(sim.now(), SimTime(5));
    assert_eq!(sim.pending(), 1);

    sim.run(&mut world).unwrap();
    assert_eq!(world.log, [1, 2]);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn run_until_executes_events_scheduled_exactly_at_until() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime(5), TestAction::Push(1)).unwrap();

    let mut world = DummyWorld::default();
    sim.run_until(SimTime(5), &mut world).unwrap();

    assert_eq!(world.log, [1]);
    assert_eq!(sim.now(), SimTime(5));
}

#[test]
fn run_until_advances_time_even_if_there_are_no_events() {
    let mut sim: Simulator<TestAction> = Simulator::default();
    let mut world = DummyWorld::default();

    sim.run_until(SimTime(7), &mut world).unwrap();
    assert_eq!(sim.now(), SimTime(7));
    assert_eq!(world.ticks, 0);
}

#[test]
fn scheduling_in_the_past_is_rejected() {
    let mut sim = Simulator::default();
    let mut world = DummyWorld::default();
    sim.run_until(SimTime(10), &mut world).unwrap();

    let err = sim.schedule(SimTime(9), TestAction::Push(1)).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidSchedule { at: SimTime(9), now: SimTime(10) }
    ));
    assert!(sim.schedule(SimTime(10), TestAction::Push(1)).is_ok());
}

#[test]
fn dispatch_error_aborts_run_until() {
    let mut sim = Simulator::default();
    sim.schedule(SimTime(3), TestAction::ScheduleInPast).unwrap();
    sim.schedule(SimTime(4), TestAction::Push(9)).unwrap();

    let mut world = DummyWorld::default();
    let err = sim.run_until(SimTime(100), &mut world).unwrap_err();

    assert!(matches!(err, SimError::InvalidSchedule { .. }));
    assert!(world.log.is_empty());
    assert_eq!(sim.now(), SimTime(3));
}

#[test]
fn cancelled_event_never_fires() {
    let mut sim = Simulator::default();
    let h = sim.schedule(SimTime(5), TestAction::Push(1)).unwrap();
    sim.schedule(SimTime(6), TestAction::Push(2)).unwrap();

    assert!(sim.cancel(h).unwrap());
    assert!(!sim.cancel(h).unwrap(), "second cancel is a no-op");
    assert_eq!(sim.pending(), 1);

    let mut world = DummyWorld::default();
    sim.run(&mut world).unwrap();
    assert_eq!(world.log, [2]);
}

#[test]
fn cancel_after_fire_returns_false() {
    let mut sim = Simulator::default();
    let h = sim.schedule(SimTime(1), TestAction::Push(1)).unwrap();
    let mut world = DummyWorld::default();
    sim.run(&mut world).unwrap();

    assert!(!sim.cancel(h).unwrap());
}

#[test]
fn cancel_unknown_handle_fails() {
    let mut sim: Simulator<TestAction> = Simulator::default();
    let err = sim.cancel(EventHandle(42)).unwrap_err();
    assert!(matches!(err, SimError::UnknownHandle(EventHandle(42))));
}

#[test]
fn schedule_in_is_relative_to_now() {
    let mut sim = Simulator::default();
    let mut world = DummyWorld::default();
    sim.run_until(SimTime(100), &mut world).unwrap();
    sim.schedule_in(SimTime(5), TestAction::Push(7)).unwrap();
    sim.run(&mut world).unwrap();
    assert_eq!(sim.now(), SimTime(105));
}
