//! Conformance tests for the control interface.
//!
//! Covers the command state machine, paired-registration enforcement for
//! all four designated pairs, control-callback observation, and the
//! terminal permanently-off state.

mod common;

use common::init_test_logging;
use parascope::control::PAIRED_EVENTS;
use parascope::{
    Callback, CallbackShape, ControlCommand, Event, Monitor, MonitorError, RuntimeTables,
    ToolStatus,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

fn inactive_monitor() -> Monitor {
    Monitor::new(RuntimeTables::shared(), ToolStatus::Disabled)
}

/// A do-nothing handler of the right shape for `event`.
fn noop_callback(event: Event) -> Callback {
    match event.shape() {
        CallbackShape::Thread => Callback::thread(|_| {}),
        CallbackShape::Parallel => Callback::parallel(|_, _| {}),
        other => panic!("paired events are Thread- or Parallel-shaped, got {other:?}"),
    }
}

#[test]
fn each_pair_is_enforced_in_both_directions() {
    init_test_logging();
    for (begin, end) in PAIRED_EVENTS {
        // Begin without end.
        let monitor = inactive_monitor();
        assert!(monitor.set_callback(begin, noop_callback(begin)));
        let err = monitor
            .control(ControlCommand::StartRestart, 0)
            .expect_err("begin-only registration must fail activation");
        assert_eq!(
            err,
            MonitorError::UnpairedCallback {
                registered: begin,
                missing: end,
            }
        );
        assert!(!monitor.is_monitoring());

        // End without begin.
        let monitor = inactive_monitor();
        assert!(monitor.set_callback(end, noop_callback(end)));
        let err = monitor
            .control(ControlCommand::StartRestart, 0)
            .expect_err("end-only registration must fail activation");
        assert_eq!(
            err,
            MonitorError::UnpairedCallback {
                registered: end,
                missing: begin,
            }
        );

        // Both halves.
        let monitor = inactive_monitor();
        assert!(monitor.set_callback(begin, noop_callback(begin)));
        assert!(monitor.set_callback(end, noop_callback(end)));
        monitor
            .control(ControlCommand::StartRestart, 0)
            .expect("complete pair must activate");
        assert!(monitor.is_monitoring());
    }
}

#[test]
fn neither_half_registered_activates_trivially() {
    init_test_logging();
    let monitor = inactive_monitor();
    monitor
        .control(ControlCommand::StartRestart, 0)
        .expect("empty registration passes the pairing check");
    assert!(monitor.is_monitoring());
}

#[test]
fn unpaired_registration_on_unrelated_events_is_fine() {
    init_test_logging();
    let monitor = inactive_monitor();
    // ParallelBegin has no designated pair; registering it alone is valid.
    assert!(monitor.set_callback(
        Event::ParallelBegin,
        Callback::new_parallel(|_, _, _, _, _| {})
    ));
    monitor
        .control(ControlCommand::StartRestart, 0)
        .expect("unpaired-by-design event passes");
    assert!(monitor.is_monitoring());
}

#[test]
fn control_callback_observes_every_honored_command() {
    init_test_logging();
    let monitor = Arc::new(inactive_monitor());
    let log: Arc<Mutex<Vec<(u64, u64, bool)>>> = Arc::new(Mutex::new(Vec::new()));

    let log2 = Arc::clone(&log);
    let observer = Arc::clone(&monitor);
    assert!(monitor.set_callback(
        Event::Control,
        Callback::control(move |command, modifier| {
            // The transition is applied before notification, so the flag
            // state visible here reflects the command just processed.
            log2.lock()
                .unwrap()
                .push((command, modifier, observer.is_monitoring()));
        })
    ));

    monitor.control(ControlCommand::StartRestart, 11).expect("start");
    monitor.control(ControlCommand::FlushContinue, 22).expect("flush");
    monitor.control(ControlCommand::Pause, 33).expect("pause");
    monitor.control(ControlCommand::PermanentlyOff, 44).expect("off");

    let entries = log.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            (ControlCommand::StartRestart.raw(), 11, true),
            (ControlCommand::FlushContinue.raw(), 22, true),
            (ControlCommand::Pause.raw(), 33, false),
            (ControlCommand::PermanentlyOff.raw(), 44, false),
        ]
    );
}

#[test]
fn permanently_off_silences_the_control_callback_too() {
    init_test_logging();
    let monitor = inactive_monitor();
    let hits = Arc::new(AtomicU32::new(0));
    let hits2 = Arc::clone(&hits);
    assert!(monitor.set_callback(
        Event::Control,
        Callback::control(move |_, _| {
            hits2.fetch_add(1, Ordering::SeqCst);
        })
    ));

    monitor.control(ControlCommand::PermanentlyOff, 0).expect("off");
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Terminal: later commands are no-ops and notify nothing.
    monitor.control(ControlCommand::StartRestart, 0).expect("noop");
    monitor.control(ControlCommand::Pause, 0).expect("noop");
    monitor.control_raw(2, 0).expect("noop");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!monitor.is_monitoring());
    assert!(!monitor.is_initialized());
}

#[test]
fn pause_preserves_registrations() {
    init_test_logging();
    let monitor = inactive_monitor();
    let hits = Arc::new(AtomicU32::new(0));
    let hits2 = Arc::clone(&hits);
    assert!(monitor.set_callback(
        Event::RuntimeShutdown,
        Callback::bare(move || {
            hits2.fetch_add(1, Ordering::SeqCst);
        })
    ));

    monitor.control(ControlCommand::StartRestart, 0).expect("start");
    monitor.fire(Event::RuntimeShutdown);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    monitor.control(ControlCommand::Pause, 0).expect("pause");
    monitor.fire(Event::RuntimeShutdown);
    assert_eq!(hits.load(Ordering::SeqCst), 1, "paused monitor must not dispatch");

    monitor.control(ControlCommand::StartRestart, 0).expect("restart");
    monitor.fire(Event::RuntimeShutdown);
    assert_eq!(hits.load(Ordering::SeqCst), 2, "registration survives a pause");
}

#[test]
fn unknown_raw_commands_do_not_transition_or_notify() {
    init_test_logging();
    let monitor = inactive_monitor();
    let hits = Arc::new(AtomicU32::new(0));
    let hits2 = Arc::clone(&hits);
    assert!(monitor.set_callback(
        Event::Control,
        Callback::control(move |_, _| {
            hits2.fetch_add(1, Ordering::SeqCst);
        })
    ));

    let err = monitor.control_raw(1000, 5).expect_err("unknown command");
    assert_eq!(err, MonitorError::UnknownCommand { command: 1000 });
    assert!(!monitor.is_monitoring());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
