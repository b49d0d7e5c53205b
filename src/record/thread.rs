//! Virtual-thread records and the per-native-thread binding.
//!
//! A virtual thread is the host runtime's per-execution-context record: its
//! kind, execution state, awaited resource, current team, and implicit
//! task. The engine resolves "the calling thread" through a thread-local
//! binding from the native thread to its virtual-thread index — the host
//! binds each worker when it attaches it to the runtime.

use crate::types::{EntryPoint, ExecState, FrameRecord, ThreadKind, WaitId};
use crate::util::ArenaIndex;
use std::cell::Cell;

/// The host runtime's record for one virtual thread.
#[derive(Debug, Clone)]
pub struct ThreadRecord {
    /// What kind of thread this is.
    pub kind: ThreadKind,
    /// Current execution state.
    pub state: ExecState,
    /// Resource currently awaited; meaningful only in wait states.
    pub wait_id: WaitId,
    /// The team this thread is currently a member of.
    pub team: Option<ArenaIndex>,
    /// The thread's implicit task.
    pub implicit_task: Option<ArenaIndex>,
    /// Frame recorded when the thread enters idle; meaningful only while idle.
    pub idle_frame: Option<FrameRecord>,
    /// The outlined function this thread entered the current construct with.
    pub entry: Option<EntryPoint>,
}

impl ThreadRecord {
    /// Creates a record for a freshly attached thread doing serial work.
    #[must_use]
    pub const fn new(kind: ThreadKind) -> Self {
        Self {
            kind,
            state: ExecState::WorkSerial,
            wait_id: WaitId::NONE,
            team: None,
            implicit_task: None,
            idle_frame: None,
            entry: None,
        }
    }
}

thread_local! {
    static CURRENT_VTHREAD: Cell<Option<ArenaIndex>> = const { Cell::new(None) };
}

/// Binds the calling native thread to a virtual-thread record.
///
/// Subsequent `fire` and inquiry calls on this native thread resolve their
/// context through this binding. Rebinding replaces the previous binding.
pub fn bind_current(index: ArenaIndex) {
    CURRENT_VTHREAD.with(|slot| slot.set(Some(index)));
}

/// Clears the calling native thread's binding.
pub fn unbind_current() {
    CURRENT_VTHREAD.with(|slot| slot.set(None));
}

/// The calling native thread's bound virtual-thread index, if any.
#[must_use]
pub fn current_binding() -> Option<ArenaIndex> {
    CURRENT_VTHREAD.with(Cell::get)
}

/// RAII binding for scoped use: restores the previous binding on drop.
///
/// ```
/// use parascope::record::{BindingGuard, RuntimeTables, ThreadRecord};
/// use parascope::types::ThreadKind;
///
/// let mut tables = RuntimeTables::new();
/// let thread = tables.spawn_thread(ThreadRecord::new(ThreadKind::Worker));
/// let _guard = BindingGuard::bind(thread);
/// // engine calls on this native thread now resolve to `thread`
/// ```
#[derive(Debug)]
pub struct BindingGuard {
    previous: Option<ArenaIndex>,
}

impl BindingGuard {
    /// Binds the calling thread, remembering the previous binding.
    #[must_use]
    pub fn bind(index: ArenaIndex) -> Self {
        let previous = CURRENT_VTHREAD.with(|slot| slot.replace(Some(index)));
        Self { previous }
    }
}

impl Drop for BindingGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        CURRENT_VTHREAD.with(|slot| slot.set(previous));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_is_per_thread_and_restorable() {
        let a = ArenaIndex::new(0, 0);
        let b = ArenaIndex::new(1, 0);

        bind_current(a);
        assert_eq!(current_binding(), Some(a));

        {
            let _guard = BindingGuard::bind(b);
            assert_eq!(current_binding(), Some(b));
        }
        assert_eq!(current_binding(), Some(a));

        unbind_current();
        assert_eq!(current_binding(), None);
    }

    #[test]
    fn other_threads_start_unbound() {
        bind_current(ArenaIndex::new(3, 0));
        let seen = std::thread::spawn(current_binding).join().expect("join");
        assert_eq!(seen, None);
        unbind_current();
    }

    #[test]
    fn new_record_defaults() {
        let record = ThreadRecord::new(ThreadKind::Worker);
        assert_eq!(record.state, ExecState::WorkSerial);
        assert_eq!(record.wait_id, WaitId::NONE);
        assert!(record.team.is_none());
        assert!(record.implicit_task.is_none());
    }
}
