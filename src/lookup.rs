//! Name-to-function discovery for dynamically attached tools.
//!
//! A tool that attaches without static linkage discovers the inquiry,
//! registration, and control surface by name. Each discoverable entry point
//! is one [`InterfaceFn`] variant holding a typed function pointer, so a
//! dynamically attached tool gets the same signature safety as a
//! statically linked one — there is no `void (*)(void)` to cast. Unknown
//! names yield `None`, which is itself the "not supported" signal, not a
//! failure.

use crate::callback::Callback;
use crate::error::MonitorError;
use crate::event::Event;
use crate::inquiry::{enumerate_state, NextState};
use crate::monitor::Monitor;
use crate::types::{ExecState, FrameRecord, ParallelId, TaskId, ThreadId, WaitId};

/// A typed handle to one discoverable entry point.
///
/// Monitor-bound entry points take the [`Monitor`] explicitly; a tool
/// receives the monitor handle from the host as part of attachment.
#[derive(Debug, Clone, Copy)]
pub enum InterfaceFn {
    /// Advances the state enumeration; see [`enumerate_state`].
    EnumerateState(fn(ExecState) -> NextState),
    /// The calling thread's public id; see [`Monitor::thread_id`].
    GetThreadId(fn(&Monitor) -> ThreadId),
    /// Registers a handler; see [`Monitor::set_callback`].
    SetCallback(fn(&Monitor, Event, Callback) -> bool),
    /// Reads a registered handler; see [`Monitor::get_callback`].
    GetCallback(fn(&Monitor, Event) -> Option<Callback>),
    /// The calling thread's idle frame; see [`Monitor::idle_frame`].
    GetIdleFrame(fn(&Monitor) -> Option<FrameRecord>),
    /// The calling thread's state and wait id; see [`Monitor::thread_state`].
    GetState(fn(&Monitor) -> (ExecState, WaitId)),
    /// Ancestor region id; see [`Monitor::parallel_id`].
    GetParallelId(fn(&Monitor, u32) -> ParallelId),
    /// Ancestor team size; see [`Monitor::team_size`].
    GetParallelTeamSize(fn(&Monitor, u32) -> i32),
    /// Ancestor task frame; see [`Monitor::task_frame`].
    GetTaskFrame(fn(&Monitor, u32) -> Option<FrameRecord>),
    /// Ancestor task id; see [`Monitor::task_id`].
    GetTaskId(fn(&Monitor, u32) -> TaskId),
    /// Applies a raw control command; see [`Monitor::control_raw`].
    Control(fn(&Monitor, u64, u64) -> Result<(), MonitorError>),
}

impl InterfaceFn {
    /// The canonical lookup name of this entry point.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EnumerateState(_) => "enumerate_state",
            Self::GetThreadId(_) => "get_thread_id",
            Self::SetCallback(_) => "set_callback",
            Self::GetCallback(_) => "get_callback",
            Self::GetIdleFrame(_) => "get_idle_frame",
            Self::GetState(_) => "get_state",
            Self::GetParallelId(_) => "get_parallel_id",
            Self::GetParallelTeamSize(_) => "get_parallel_team_size",
            Self::GetTaskFrame(_) => "get_task_frame",
            Self::GetTaskId(_) => "get_task_id",
            Self::Control(_) => "control",
        }
    }
}

/// Resolves an entry-point name to its typed handle.
///
/// Unknown names yield `None`.
#[must_use]
pub fn lookup(name: &str) -> Option<InterfaceFn> {
    let entry = match name {
        "enumerate_state" => InterfaceFn::EnumerateState(enumerate_state),
        "get_thread_id" => InterfaceFn::GetThreadId(Monitor::thread_id),
        "set_callback" => InterfaceFn::SetCallback(Monitor::set_callback),
        "get_callback" => InterfaceFn::GetCallback(Monitor::get_callback),
        "get_idle_frame" => InterfaceFn::GetIdleFrame(Monitor::idle_frame),
        "get_state" => InterfaceFn::GetState(Monitor::thread_state),
        "get_parallel_id" => InterfaceFn::GetParallelId(Monitor::parallel_id),
        "get_parallel_team_size" => InterfaceFn::GetParallelTeamSize(Monitor::team_size),
        "get_task_frame" => InterfaceFn::GetTaskFrame(Monitor::task_frame),
        "get_task_id" => InterfaceFn::GetTaskId(Monitor::task_id),
        "control" => InterfaceFn::Control(Monitor::control_raw),
        _ => return None,
    };
    Some(entry)
}

/// Every name the lookup table resolves, for discovery and tests.
pub const ALL_NAMES: [&str; 11] = [
    "enumerate_state",
    "get_thread_id",
    "set_callback",
    "get_callback",
    "get_idle_frame",
    "get_state",
    "get_parallel_id",
    "get_parallel_team_size",
    "get_task_frame",
    "get_task_id",
    "control",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolStatus;
    use crate::record::RuntimeTables;

    #[test]
    fn every_published_name_resolves_to_itself() {
        for name in ALL_NAMES {
            let entry = lookup(name).expect("published name resolves");
            assert_eq!(entry.name(), name);
        }
    }

    #[test]
    fn unknown_names_yield_none() {
        assert!(lookup("").is_none());
        assert!(lookup("get_thread").is_none());
        assert!(lookup("ENUMERATE_STATE").is_none());
    }

    #[test]
    fn resolved_handles_are_callable() {
        let monitor = Monitor::new(RuntimeTables::shared(), ToolStatus::Enabled);

        let Some(InterfaceFn::SetCallback(set)) = lookup("set_callback") else {
            panic!("set_callback resolves");
        };
        assert!(set(&monitor, Event::Flush, Callback::thread(|_| {})));

        let Some(InterfaceFn::GetCallback(get)) = lookup("get_callback") else {
            panic!("get_callback resolves");
        };
        assert!(get(&monitor, Event::Flush).is_some());

        let Some(InterfaceFn::EnumerateState(enumerate)) = lookup("enumerate_state") else {
            panic!("enumerate_state resolves");
        };
        assert_eq!(enumerate(ExecState::First).state, ExecState::WorkSerial);
    }
}
