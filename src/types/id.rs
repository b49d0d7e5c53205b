//! Identifier types for the instrumentation id spaces.
//!
//! Threads, tasks, parallel regions, and awaited resources each have their
//! own public `u64` id space. Zero is reserved in all four spaces as the
//! "none / not applicable" value, so every type carries a `NONE` constant
//! and an `is_none` predicate instead of wrapping in `Option` at the
//! callback boundary.

use core::fmt;

/// A stable public identifier for a virtual thread.
///
/// Real threads always have non-zero ids: the public id is the internal
/// slot index plus one, reserving zero for "no thread".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreadId(u64);

impl ThreadId {
    /// The reserved "no thread" id.
    pub const NONE: Self = Self(0);

    /// Creates a thread id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the reserved "no thread" id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Th{}", self.0)
    }
}

/// A stable public identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(u64);

impl TaskId {
    /// The reserved "no task" id.
    pub const NONE: Self = Self(0);

    /// Creates a task id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the reserved "no task" id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A stable public identifier for a parallel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelId(u64);

impl ParallelId {
    /// The reserved "no region" id.
    pub const NONE: Self = Self(0);

    /// Creates a parallel-region id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the reserved "no region" id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ParallelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Identifies the resource a thread is currently waiting on (a lock,
/// barrier, or similar). Meaningful only while the owning thread is in a
/// wait state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitId(u64);

impl WaitId {
    /// The reserved "not waiting on anything" id.
    pub const NONE: Self = Self(0);

    /// Creates a wait id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the reserved "not waiting" id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WaitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_ids_are_zero() {
        assert!(ThreadId::NONE.is_none());
        assert!(TaskId::NONE.is_none());
        assert!(ParallelId::NONE.is_none());
        assert!(WaitId::NONE.is_none());
        assert!(!TaskId::new(1).is_none());
    }

    #[test]
    fn display_prefixes() {
        assert_eq!(ThreadId::new(3).to_string(), "Th3");
        assert_eq!(TaskId::new(42).to_string(), "T42");
        assert_eq!(ParallelId::new(7).to_string(), "P7");
        assert_eq!(WaitId::new(9).to_string(), "W9");
    }

    #[test]
    fn default_is_none() {
        assert_eq!(ThreadId::default(), ThreadId::NONE);
        assert_eq!(TaskId::default(), TaskId::NONE);
    }
}
