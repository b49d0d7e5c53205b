//! The typed callback union.
//!
//! A tool registers one [`Callback`] per event. Each variant carries the
//! exact callable signature for one [`CallbackShape`], so the dispatch
//! engine invokes handlers by pattern match instead of reinterpreting an
//! opaque function pointer. Registering a variant whose shape disagrees
//! with the event's classification is rejected up front (see
//! [`crate::Monitor::set_callback`]); it cannot reach a call site.
//!
//! Handlers run synchronously on the firing thread. A handler that blocks
//! stalls that thread's progress through the runtime; the engine applies no
//! timeout.

use crate::event::CallbackShape;
use crate::types::{EntryPoint, FrameRecord, ParallelId, TaskId, ThreadId, ThreadKind, WaitId};
use core::fmt;
use std::sync::Arc;

/// Handler for events carrying no arguments.
pub type BareFn = Arc<dyn Fn() + Send + Sync>;
/// Handler receiving the firing thread's id.
pub type ThreadFn = Arc<dyn Fn(ThreadId) + Send + Sync>;
/// Handler receiving the firing thread's kind and id.
pub type ThreadTypeFn = Arc<dyn Fn(ThreadKind, ThreadId) + Send + Sync>;
/// Handler receiving the awaited resource id.
pub type WaitFn = Arc<dyn Fn(WaitId) + Send + Sync>;
/// Handler receiving the enclosing region id and current task id.
pub type ParallelFn = Arc<dyn Fn(ParallelId, TaskId) + Send + Sync>;
/// Handler receiving a new workshare's region id, task id, and entry function.
pub type NewWorkshareFn = Arc<dyn Fn(ParallelId, TaskId, Option<EntryPoint>) + Send + Sync>;
/// Handler receiving a new parallel region's parent task id and frame, the
/// region id, the requested team size, and the region's entry function.
pub type NewParallelFn =
    Arc<dyn Fn(TaskId, Option<FrameRecord>, ParallelId, u32, Option<EntryPoint>) + Send + Sync>;
/// Handler receiving the affected task's id.
pub type TaskFn = Arc<dyn Fn(TaskId) + Send + Sync>;
/// Handler receiving the suspended and resumed task ids of a switch.
pub type TaskSwitchFn = Arc<dyn Fn(TaskId, TaskId) + Send + Sync>;
/// Handler receiving a new task's parent id and frame, the new task's id,
/// and its entry function.
pub type NewTaskFn =
    Arc<dyn Fn(TaskId, Option<FrameRecord>, TaskId, Option<EntryPoint>) + Send + Sync>;
/// Handler receiving the raw control command and modifier words.
pub type ControlFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// A registered event handler, tagged by its argument shape.
#[derive(Clone)]
pub enum Callback {
    /// No-argument handler.
    Bare(BareFn),
    /// Thread-id handler.
    Thread(ThreadFn),
    /// Thread kind-and-id handler.
    ThreadType(ThreadTypeFn),
    /// Wait-id handler.
    Wait(WaitFn),
    /// Region-and-task handler.
    Parallel(ParallelFn),
    /// New-workshare handler.
    NewWorkshare(NewWorkshareFn),
    /// New-parallel-region handler.
    NewParallel(NewParallelFn),
    /// Task-id handler.
    Task(TaskFn),
    /// Task-switch handler.
    TaskSwitch(TaskSwitchFn),
    /// New-task handler.
    NewTask(NewTaskFn),
    /// Control-command handler.
    Control(ControlFn),
}

impl Callback {
    /// Wraps a no-argument handler.
    pub fn bare(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Bare(Arc::new(f))
    }

    /// Wraps a thread-id handler.
    pub fn thread(f: impl Fn(ThreadId) + Send + Sync + 'static) -> Self {
        Self::Thread(Arc::new(f))
    }

    /// Wraps a thread kind-and-id handler.
    pub fn thread_type(f: impl Fn(ThreadKind, ThreadId) + Send + Sync + 'static) -> Self {
        Self::ThreadType(Arc::new(f))
    }

    /// Wraps a wait-id handler.
    pub fn wait(f: impl Fn(WaitId) + Send + Sync + 'static) -> Self {
        Self::Wait(Arc::new(f))
    }

    /// Wraps a region-and-task handler.
    pub fn parallel(f: impl Fn(ParallelId, TaskId) + Send + Sync + 'static) -> Self {
        Self::Parallel(Arc::new(f))
    }

    /// Wraps a new-workshare handler.
    pub fn new_workshare(
        f: impl Fn(ParallelId, TaskId, Option<EntryPoint>) + Send + Sync + 'static,
    ) -> Self {
        Self::NewWorkshare(Arc::new(f))
    }

    /// Wraps a new-parallel-region handler.
    pub fn new_parallel(
        f: impl Fn(TaskId, Option<FrameRecord>, ParallelId, u32, Option<EntryPoint>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self::NewParallel(Arc::new(f))
    }

    /// Wraps a task-id handler.
    pub fn task(f: impl Fn(TaskId) + Send + Sync + 'static) -> Self {
        Self::Task(Arc::new(f))
    }

    /// Wraps a task-switch handler.
    pub fn task_switch(f: impl Fn(TaskId, TaskId) + Send + Sync + 'static) -> Self {
        Self::TaskSwitch(Arc::new(f))
    }

    /// Wraps a new-task handler.
    pub fn new_task(
        f: impl Fn(TaskId, Option<FrameRecord>, TaskId, Option<EntryPoint>) + Send + Sync + 'static,
    ) -> Self {
        Self::NewTask(Arc::new(f))
    }

    /// Wraps a control-command handler.
    pub fn control(f: impl Fn(u64, u64) + Send + Sync + 'static) -> Self {
        Self::Control(Arc::new(f))
    }

    /// Returns the shape this handler can be invoked with.
    #[must_use]
    pub const fn shape(&self) -> CallbackShape {
        match self {
            Self::Bare(_) => CallbackShape::Bare,
            Self::Thread(_) => CallbackShape::Thread,
            Self::ThreadType(_) => CallbackShape::ThreadType,
            Self::Wait(_) => CallbackShape::Wait,
            Self::Parallel(_) => CallbackShape::Parallel,
            Self::NewWorkshare(_) => CallbackShape::NewWorkshare,
            Self::NewParallel(_) => CallbackShape::NewParallel,
            Self::Task(_) => CallbackShape::Task,
            Self::TaskSwitch(_) => CallbackShape::TaskSwitch,
            Self::NewTask(_) => CallbackShape::NewTask,
            Self::Control(_) => CallbackShape::Control,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback::{:?}", self.shape())
    }
}
