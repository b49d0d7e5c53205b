//! Runtime records the engine reads: threads, tasks, teams.
//!
//! These tables model the host runtime's bookkeeping. The dispatch engine
//! and inquiry surface only ever *read* them; the mutation surface exists
//! for the host (and tests) to build and maintain the world. Parent links
//! between tasks and between teams are arena indices — a child never owns
//! its parent, the root has `None`, and a stale index resolves to nothing
//! rather than a recycled record.

use crate::types::{EntryPoint, ExecState, ParallelId, TaskId, WaitId};
use crate::util::{Arena, ArenaIndex};
use std::sync::{Arc, RwLock};

pub mod task;
pub mod team;
pub mod thread;

pub use task::TaskRecord;
pub use team::TeamRecord;
pub use thread::{bind_current, current_binding, unbind_current, BindingGuard, ThreadRecord};

/// The runtime tables as shared between the host runtime and a [`crate::Monitor`].
pub type SharedTables = Arc<RwLock<RuntimeTables>>;

/// Whether the runtime is executing serially or inside parallel machinery.
///
/// Sequential mode short-circuits parallel-region inquiry to the
/// "no region" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// No parallel construct is active anywhere in the process.
    #[default]
    Sequential,
    /// Parallel execution machinery is live.
    Parallel,
}

/// The announcement a host posts immediately before firing
/// [`crate::Event::ParallelBegin`]: the fresh region's id, the requested
/// team size, and the outlined region body.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingParallel {
    /// Id assigned to the region being created.
    pub region: ParallelId,
    /// Number of threads requested for the new team.
    pub team_size: u32,
    /// The outlined parallel-region function.
    pub entry: Option<EntryPoint>,
}

/// The announcement a host posts immediately before firing
/// [`crate::Event::TaskSwitch`]; relayed to the handler verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSwitchIds {
    /// The task being suspended.
    pub suspended: TaskId,
    /// The task being resumed.
    pub resumed: TaskId,
}

/// The record tables owned by the host runtime.
#[derive(Debug, Default)]
pub struct RuntimeTables {
    threads: Arena<ThreadRecord>,
    tasks: Arena<TaskRecord>,
    teams: Arena<TeamRecord>,
    pending_parallel: PendingParallel,
    task_switch: TaskSwitchIds,
    current_task: Option<ArenaIndex>,
    mode: ExecMode,
}

impl RuntimeTables {
    /// Creates empty tables in sequential mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps fresh tables for sharing with a [`crate::Monitor`].
    #[must_use]
    pub fn shared() -> SharedTables {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Registers a virtual thread and returns its index.
    pub fn spawn_thread(&mut self, record: ThreadRecord) -> ArenaIndex {
        self.threads.insert(record)
    }

    /// Registers a task and returns its index.
    pub fn spawn_task(&mut self, record: TaskRecord) -> ArenaIndex {
        self.tasks.insert(record)
    }

    /// Registers a team and returns its index.
    pub fn create_team(&mut self, record: TeamRecord) -> ArenaIndex {
        self.teams.insert(record)
    }

    /// Removes a thread record.
    pub fn retire_thread(&mut self, index: ArenaIndex) -> Option<ThreadRecord> {
        self.threads.remove(index)
    }

    /// Removes a task record.
    pub fn retire_task(&mut self, index: ArenaIndex) -> Option<TaskRecord> {
        self.tasks.remove(index)
    }

    /// Removes a team record.
    pub fn retire_team(&mut self, index: ArenaIndex) -> Option<TeamRecord> {
        self.teams.remove(index)
    }

    /// Looks up a thread record.
    #[must_use]
    pub fn thread(&self, index: ArenaIndex) -> Option<&ThreadRecord> {
        self.threads.get(index)
    }

    /// Looks up a thread record mutably.
    pub fn thread_mut(&mut self, index: ArenaIndex) -> Option<&mut ThreadRecord> {
        self.threads.get_mut(index)
    }

    /// Looks up a task record.
    #[must_use]
    pub fn task(&self, index: ArenaIndex) -> Option<&TaskRecord> {
        self.tasks.get(index)
    }

    /// Looks up a task record mutably.
    pub fn task_mut(&mut self, index: ArenaIndex) -> Option<&mut TaskRecord> {
        self.tasks.get_mut(index)
    }

    /// Looks up a team record.
    #[must_use]
    pub fn team(&self, index: ArenaIndex) -> Option<&TeamRecord> {
        self.teams.get(index)
    }

    /// Looks up a team record mutably.
    pub fn team_mut(&mut self, index: ArenaIndex) -> Option<&mut TeamRecord> {
        self.teams.get_mut(index)
    }

    /// The current execution mode.
    #[must_use]
    pub const fn mode(&self) -> ExecMode {
        self.mode
    }

    /// Sets the execution mode.
    pub fn set_mode(&mut self, mode: ExecMode) {
        self.mode = mode;
    }

    /// The pending parallel-region announcement.
    #[must_use]
    pub const fn pending_parallel(&self) -> PendingParallel {
        self.pending_parallel
    }

    /// Posts the parallel-region announcement read by `ParallelBegin` dispatch.
    pub fn set_pending_parallel(&mut self, pending: PendingParallel) {
        self.pending_parallel = pending;
    }

    /// The pending task-switch announcement.
    #[must_use]
    pub const fn task_switch(&self) -> TaskSwitchIds {
        self.task_switch
    }

    /// Posts the task-switch announcement read by `TaskSwitch` dispatch.
    pub fn set_task_switch(&mut self, switch: TaskSwitchIds) {
        self.task_switch = switch;
    }

    /// The scheduler's current explicit task, if any.
    #[must_use]
    pub const fn current_task(&self) -> Option<ArenaIndex> {
        self.current_task
    }

    /// Sets the scheduler's current explicit task.
    pub fn set_current_task(&mut self, task: Option<ArenaIndex>) {
        self.current_task = task;
    }

    /// Public id of the current explicit task, `TaskId::NONE` when absent.
    #[must_use]
    pub fn current_task_id(&self) -> TaskId {
        self.current_task
            .and_then(|index| self.tasks.get(index))
            .map_or(TaskId::NONE, |task| task.id)
    }

    /// Updates a thread's execution state and awaited-resource id together.
    ///
    /// The host calls this at every state transition so that wait-state
    /// inquiry observes a consistent `(state, wait_id)` pair.
    pub fn set_thread_state(&mut self, thread: ArenaIndex, state: ExecState, wait_id: WaitId) {
        if let Some(record) = self.threads.get_mut(thread) {
            record.state = state;
            record.wait_id = wait_id;
        }
    }

    /// Number of live thread records.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Number of live task records.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of live team records.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}
