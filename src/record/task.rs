//! Task records.

use crate::types::{FrameRecord, TaskId};
use crate::util::ArenaIndex;

/// The host runtime's record for one task (implicit or explicit).
///
/// Tasks form a tree through `parent`; the initial task has no parent.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    /// Stable public id.
    pub id: TaskId,
    /// Parent task, `None` for the initial task.
    pub parent: Option<ArenaIndex>,
    /// The task's stack-frame record.
    pub frame: FrameRecord,
}

impl TaskRecord {
    /// Creates a task record.
    #[must_use]
    pub const fn new(id: TaskId, parent: Option<ArenaIndex>, frame: FrameRecord) -> Self {
        Self { id, parent, frame }
    }
}
