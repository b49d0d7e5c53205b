//! Read-only introspection for attached tools.
//!
//! Everything here is callable from any thread, at any time, independent of
//! event dispatch — a sampling profiler typically calls these from a signal
//! or timer context between events. Absent context is always a sentinel
//! (`NONE` ids, `-1` sizes, `None` frames), never an error.

use crate::context;
use crate::monitor::Monitor;
use crate::record;
use crate::types::{ExecState, FrameRecord, ParallelId, TaskId, ThreadId, WaitId};

/// One step of the state enumeration: the state after the queried one, its
/// canonical name, and whether further states remain before the cycle
/// closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextState {
    /// The state following the queried one in enumeration order.
    pub state: ExecState,
    /// Canonical name of `state`.
    pub name: &'static str,
    /// False exactly when the enumeration has wrapped to the sentinel.
    pub more: bool,
}

/// Advances the state enumeration one step past `current`.
///
/// The enumeration walks [`ExecState::ALL`] cyclically. A tool discovers
/// the complete supported-state vocabulary by starting from
/// [`ExecState::First`] and advancing until `more` is false — every other
/// state is visited exactly once:
///
/// ```
/// use parascope::{enumerate_state, ExecState};
///
/// let mut seen = Vec::new();
/// let mut step = enumerate_state(ExecState::First);
/// while step.more {
///     seen.push(step.state);
///     step = enumerate_state(step.state);
/// }
/// assert_eq!(seen.len(), ExecState::ALL.len() - 1);
/// ```
#[must_use]
pub fn enumerate_state(current: ExecState) -> NextState {
    let next_index = ExecState::ALL
        .iter()
        .position(|state| *state == current)
        .map_or(0, |index| (index + 1) % ExecState::ALL.len());
    let state = ExecState::ALL[next_index];
    NextState {
        state,
        name: state.name(),
        more: state != ExecState::First,
    }
}

impl Monitor {
    /// Public id of the calling thread, `ThreadId::NONE` when the calling
    /// native thread is not bound to a virtual thread.
    #[must_use]
    pub fn thread_id(&self) -> ThreadId {
        context::current_thread_id()
    }

    /// The calling thread's execution state and currently awaited resource.
    ///
    /// The wait id is meaningful only when the state satisfies
    /// [`ExecState::is_wait`]; otherwise its contents carry no information.
    /// Unbound threads read `(ExecState::Undefined, WaitId::NONE)`.
    #[must_use]
    pub fn thread_state(&self) -> (ExecState, WaitId) {
        self.with_tables(|tables| {
            record::current_binding()
                .and_then(|index| tables.thread(index))
                .map_or((ExecState::Undefined, WaitId::NONE), |thread| {
                    (thread.state, thread.wait_id)
                })
        })
    }

    /// The calling thread's recorded idle-mode frame.
    ///
    /// Meaningful only while the thread is idle; `None` otherwise or when
    /// the thread is unbound.
    #[must_use]
    pub fn idle_frame(&self) -> Option<FrameRecord> {
        self.with_tables(|tables| {
            tables
                .thread(record::current_binding()?)?
                .idle_frame
        })
    }

    /// Frame of the calling thread's ancestor task at `depth`.
    ///
    /// Depth 0 is the implicit task itself; `None` when the chain is
    /// shorter than `depth`.
    #[must_use]
    pub fn task_frame(&self, depth: u32) -> Option<FrameRecord> {
        self.with_tables(|tables| {
            let index = record::current_binding()?;
            let task = context::ancestor_task(tables, index, depth)?;
            Some(tables.task(task)?.frame)
        })
    }

    /// Region id of the calling thread's ancestor parallel region at
    /// `level`.
    ///
    /// `ParallelId::NONE` in sequential mode, while the thread is idle, or
    /// when no ancestor exists at `level` — running outside any parallel
    /// construct is not an error.
    #[must_use]
    pub fn parallel_id(&self, level: u32) -> ParallelId {
        self.with_tables(|tables| {
            if tables.mode() == record::ExecMode::Sequential {
                return ParallelId::NONE;
            }
            let Some(index) = record::current_binding() else {
                return ParallelId::NONE;
            };
            let Some(thread) = tables.thread(index) else {
                return ParallelId::NONE;
            };
            if thread.state == ExecState::Idle {
                return ParallelId::NONE;
            }
            context::ancestor_team(tables, index, level)
                .and_then(|team| tables.team(team))
                .map_or(ParallelId::NONE, |team| team.region)
        })
    }

    /// Id of the calling thread's ancestor task at `depth`,
    /// `TaskId::NONE` when no ancestor exists there.
    #[must_use]
    pub fn task_id(&self, depth: u32) -> TaskId {
        self.with_tables(|tables| {
            record::current_binding()
                .and_then(|index| context::ancestor_task(tables, index, depth))
                .and_then(|task| tables.task(task))
                .map_or(TaskId::NONE, |task| task.id)
        })
    }

    /// Team size at the given ancestor level, `-1` when no such ancestor
    /// exists.
    #[must_use]
    pub fn team_size(&self, level: u32) -> i32 {
        self.with_tables(|tables| {
            record::current_binding()
                .map_or(-1, |index| context::team_size_at(tables, index, level))
        })
    }
}
