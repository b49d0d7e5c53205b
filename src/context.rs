//! Context accessors: resolving the calling thread's surroundings.
//!
//! Every dispatch shape needs a different slice of runtime context — a task
//! id here, a frame there, an ancestor region elsewhere. The parent-chain
//! walks live here so the eleven shapes share one traversal instead of
//! eleven. All accessors are read-only and total: a missing link is an
//! absent result, never an error. Walks hop exactly `level` parent links,
//! so termination is bounded by the argument, not by chain well-formedness.

use crate::record::{self, RuntimeTables};
use crate::types::ThreadId;
use crate::util::ArenaIndex;

/// Ancestor team of `thread`'s current team, `level` parent hops up.
///
/// Level 0 is the current team itself. `None` when the thread has no team,
/// the chain is shorter than `level`, or any link has gone stale.
pub(crate) fn ancestor_team(
    tables: &RuntimeTables,
    thread: ArenaIndex,
    level: u32,
) -> Option<ArenaIndex> {
    let mut team = tables.thread(thread)?.team?;
    for _ in 0..level {
        team = tables.team(team)?.parent?;
    }
    tables.team(team).map(|_| team)
}

/// Ancestor task of `thread`'s implicit task, `level` parent hops up.
///
/// Level 0 is the implicit task itself. `None` when the thread has no
/// implicit task or the chain is shorter than `level`.
pub(crate) fn ancestor_task(
    tables: &RuntimeTables,
    thread: ArenaIndex,
    level: u32,
) -> Option<ArenaIndex> {
    let mut task = tables.thread(thread)?.implicit_task?;
    for _ in 0..level {
        task = tables.task(task)?.parent?;
    }
    tables.task(task).map(|_| task)
}

/// The public id for a virtual-thread slot: slot index plus one, reserving
/// zero for "no thread".
pub(crate) fn public_thread_id(index: ArenaIndex) -> ThreadId {
    ThreadId::new(u64::from(index.slot()) + 1)
}

/// Public id of the calling thread, `ThreadId::NONE` when unbound.
pub(crate) fn current_thread_id() -> ThreadId {
    record::current_binding().map_or(ThreadId::NONE, public_thread_id)
}

/// Team size at the given ancestor level, `-1` when no such ancestor
/// exists. The `-1` is a domain sentinel callers must check before using
/// the value as a count.
pub(crate) fn team_size_at(tables: &RuntimeTables, thread: ArenaIndex, level: u32) -> i32 {
    ancestor_team(tables, thread, level)
        .and_then(|team| tables.team(team))
        .map_or(-1, |team| i32::try_from(team.size).unwrap_or(i32::MAX))
}
