//! Team (parallel-region) records.

use crate::types::ParallelId;
use crate::util::ArenaIndex;

/// The host runtime's record for one team of threads cooperating on a
/// parallel region.
///
/// Teams form a tree through `parent`, mirroring region nesting; the
/// outermost team has no parent.
#[derive(Debug, Clone)]
pub struct TeamRecord {
    /// Id of the parallel region this team executes.
    pub region: ParallelId,
    /// The enclosing team, `None` at the outermost level.
    pub parent: Option<ArenaIndex>,
    /// Number of threads in the team.
    pub size: u32,
}

impl TeamRecord {
    /// Creates a team record.
    #[must_use]
    pub const fn new(region: ParallelId, parent: Option<ArenaIndex>, size: u32) -> Self {
        Self {
            region,
            parent,
            size,
        }
    }
}
