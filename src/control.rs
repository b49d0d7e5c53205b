//! The control interface: start, pause, flush, permanently off.
//!
//! Tools and hosts steer monitoring through a four-command state machine.
//! Commands are honored only while the monitor's initialized flag holds;
//! `PermanentlyOff` clears that flag, making it the terminal state — no
//! later command (including `StartRestart`) has any effect on the same
//! monitor.
//!
//! Activation is where paired-registration validation happens: a tool that
//! implements only one half of a begin/end pair would see entries without
//! exits (or vice versa) for a bounded region, silently corrupting any
//! matched-pair accounting it performs. That asymmetry is a fatal
//! configuration error, reported before monitoring turns on.

use crate::callback::Callback;
use crate::error::MonitorError;
use crate::event::Event;
use crate::monitor::Monitor;
use crate::tracing_compat::debug;

/// A monitoring control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u64)]
pub enum ControlCommand {
    /// Begin or resume monitoring.
    StartRestart = 0,
    /// Suspend monitoring; registrations persist.
    Pause = 1,
    /// Flush buffered observations and continue; no state change here —
    /// firing the flush event is the host's responsibility.
    FlushContinue = 2,
    /// Disable monitoring for the remainder of the process. Terminal.
    PermanentlyOff = 3,
}

impl ControlCommand {
    /// Returns the stable command word.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self as u64
    }

    /// Decodes a raw command word, `None` outside the closed set.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::StartRestart),
            1 => Some(Self::Pause),
            2 => Some(Self::FlushContinue),
            3 => Some(Self::PermanentlyOff),
            _ => None,
        }
    }
}

/// The begin/end pairs a tool must implement both halves of.
///
/// The end event of each pair is the begin event's numeric successor;
/// `event::tests::begin_end_pairs_are_adjacent` pins that layout.
pub const PAIRED_EVENTS: [(Event, Event); 4] = [
    (Event::IdleBegin, Event::IdleEnd),
    (Event::WaitBarrierBegin, Event::WaitBarrierEnd),
    (Event::WaitTaskwaitBegin, Event::WaitTaskwaitEnd),
    (Event::WaitTaskgroupBegin, Event::WaitTaskgroupEnd),
];

impl Monitor {
    /// Applies a control command, then notifies the registered control
    /// handler (if any) with the raw command and modifier words.
    ///
    /// Silently a no-op when the monitor is uninitialized — in particular,
    /// after `PermanentlyOff`. `StartRestart` validates paired
    /// registration first and fails without activating when exactly one
    /// half of a pair is registered.
    pub fn control(&self, command: ControlCommand, modifier: u64) -> Result<(), MonitorError> {
        if !self.is_initialized() {
            return Ok(());
        }

        match command {
            ControlCommand::StartRestart => {
                self.check_paired_registration()?;
                self.set_monitoring(true);
                debug!("monitoring started");
            }
            ControlCommand::Pause => {
                self.set_monitoring(false);
                debug!("monitoring paused");
            }
            ControlCommand::FlushContinue => {}
            ControlCommand::PermanentlyOff => {
                self.clear_initialized();
                self.set_monitoring(false);
                debug!("monitoring permanently disabled");
            }
        }

        if let Some(Callback::Control(f)) = self.get_callback(Event::Control) {
            f(command.raw(), modifier);
        }
        Ok(())
    }

    /// Applies a control command given as a raw word.
    ///
    /// Unknown commands are rejected without a transition and without
    /// notifying the control handler, keeping the command set closed.
    pub fn control_raw(&self, command: u64, modifier: u64) -> Result<(), MonitorError> {
        let command =
            ControlCommand::from_raw(command).ok_or(MonitorError::UnknownCommand { command })?;
        self.control(command, modifier)
    }

    /// Verifies that each designated begin/end pair is registered either
    /// completely or not at all.
    fn check_paired_registration(&self) -> Result<(), MonitorError> {
        for (begin, end) in PAIRED_EVENTS {
            let has_begin = self.get_callback(begin).is_some();
            let has_end = self.get_callback(end).is_some();
            if has_begin && !has_end {
                return Err(MonitorError::UnpairedCallback {
                    registered: begin,
                    missing: end,
                });
            }
            if has_end && !has_begin {
                return Err(MonitorError::UnpairedCallback {
                    registered: end,
                    missing: begin,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolStatus;
    use crate::record::RuntimeTables;

    fn inactive_monitor() -> Monitor {
        Monitor::new(RuntimeTables::shared(), ToolStatus::Disabled)
    }

    #[test]
    fn command_words_round_trip() {
        for command in [
            ControlCommand::StartRestart,
            ControlCommand::Pause,
            ControlCommand::FlushContinue,
            ControlCommand::PermanentlyOff,
        ] {
            assert_eq!(ControlCommand::from_raw(command.raw()), Some(command));
        }
        assert_eq!(ControlCommand::from_raw(4), None);
    }

    #[test]
    fn start_and_pause_toggle_monitoring() {
        let monitor = inactive_monitor();
        assert!(!monitor.is_monitoring());

        monitor.control(ControlCommand::StartRestart, 0).expect("start");
        assert!(monitor.is_monitoring());

        monitor.control(ControlCommand::Pause, 0).expect("pause");
        assert!(!monitor.is_monitoring());

        monitor.control(ControlCommand::StartRestart, 0).expect("restart");
        assert!(monitor.is_monitoring());
    }

    #[test]
    fn flush_leaves_state_alone() {
        let monitor = inactive_monitor();
        monitor.control(ControlCommand::FlushContinue, 7).expect("flush");
        assert!(!monitor.is_monitoring());
        assert!(monitor.is_initialized());
    }

    #[test]
    fn unpaired_begin_blocks_activation() {
        let monitor = inactive_monitor();
        assert!(monitor.set_callback(Event::IdleBegin, Callback::thread(|_| {})));

        let err = monitor
            .control(ControlCommand::StartRestart, 0)
            .expect_err("unpaired");
        assert_eq!(
            err,
            MonitorError::UnpairedCallback {
                registered: Event::IdleBegin,
                missing: Event::IdleEnd,
            }
        );
        assert!(!monitor.is_monitoring());
    }

    #[test]
    fn unpaired_end_blocks_activation() {
        let monitor = inactive_monitor();
        assert!(monitor.set_callback(Event::WaitTaskgroupEnd, Callback::parallel(|_, _| {})));

        let err = monitor
            .control(ControlCommand::StartRestart, 0)
            .expect_err("unpaired");
        assert_eq!(
            err,
            MonitorError::UnpairedCallback {
                registered: Event::WaitTaskgroupEnd,
                missing: Event::WaitTaskgroupBegin,
            }
        );
    }

    #[test]
    fn complete_pair_allows_activation() {
        let monitor = inactive_monitor();
        assert!(monitor.set_callback(Event::WaitBarrierBegin, Callback::parallel(|_, _| {})));
        assert!(monitor.set_callback(Event::WaitBarrierEnd, Callback::parallel(|_, _| {})));

        monitor.control(ControlCommand::StartRestart, 0).expect("start");
        assert!(monitor.is_monitoring());
    }

    #[test]
    fn unknown_raw_command_is_rejected() {
        let monitor = inactive_monitor();
        let err = monitor.control_raw(99, 0).expect_err("unknown");
        assert_eq!(err, MonitorError::UnknownCommand { command: 99 });
        assert!(!monitor.is_monitoring());
    }

    #[test]
    fn permanently_off_is_terminal() {
        let monitor = inactive_monitor();
        monitor.control(ControlCommand::StartRestart, 0).expect("start");
        monitor.control(ControlCommand::PermanentlyOff, 0).expect("off");
        assert!(!monitor.is_monitoring());
        assert!(!monitor.is_initialized());

        // Every later command is a silent no-op.
        monitor.control(ControlCommand::StartRestart, 0).expect("noop");
        assert!(!monitor.is_monitoring());
        monitor.control(ControlCommand::Pause, 0).expect("noop");
        monitor.control(ControlCommand::FlushContinue, 0).expect("noop");
        assert!(!monitor.is_initialized());
    }
}
