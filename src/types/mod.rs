//! Core public types: identifiers, thread kinds, frames, execution states.
//!
//! Everything in this module is part of the stable vocabulary shared with
//! attached tools. Numeric encodings (thread kinds, execution states) are
//! ABI-stable: values are append-only and never renumbered.

use core::fmt;

pub mod id;

pub use id::{ParallelId, TaskId, ThreadId, WaitId};

/// The kind of a virtual thread, as reported to thread begin/end callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ThreadKind {
    /// The initial (main) thread of the runtime.
    Initial = 1,
    /// A worker thread owned by the runtime's pool.
    Worker = 2,
    /// A thread not managed by the runtime.
    Other = 3,
}

impl ThreadKind {
    /// Returns the stable numeric encoding.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Decodes a raw kind value, `None` for anything outside the closed set.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Initial),
            2 => Some(Self::Worker),
            3 => Some(Self::Other),
            _ => None,
        }
    }
}

/// A task's stack-frame record: the two addresses where control crosses
/// between user code and the runtime.
///
/// The engine only reads and relays frames; it never interprets the
/// addresses. `Copy` relay preserves both words, and an absent frame is
/// `Option::<FrameRecord>::None` rather than a null address pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRecord {
    /// Address of the frame that exits to the runtime (next frame is user code).
    pub exit_frame: usize,
    /// Address of the frame that re-enters from the runtime (previous frame is user code).
    pub reenter_frame: usize,
}

impl FrameRecord {
    /// Creates a frame record from its two addresses.
    #[must_use]
    pub const fn new(exit_frame: usize, reenter_frame: usize) -> Self {
        Self {
            exit_frame,
            reenter_frame,
        }
    }
}

/// Opaque address of an outlined entry function (a parallel-region or
/// workshare body). Relayed to tools verbatim, never called by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryPoint(usize);

impl EntryPoint {
    /// Creates an entry point from a code address.
    #[must_use]
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Returns the raw code address.
    #[must_use]
    pub const fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn@{:#x}", self.0)
    }
}

/// A virtual thread's current execution state.
///
/// The numeric encoding groups states into bands (work `0x00..`, idle
/// `0x10..`, overhead `0x20..`, barrier waits `0x40..`, task waits `0x50..`,
/// mutex waits `0x60..`) so tools can range-classify without enumerating.
/// [`ExecState::First`] is the enumeration sentinel used by
/// [`crate::inquiry::enumerate_state`]; it is never a real thread state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ExecState {
    /// Working outside any parallel construct.
    WorkSerial = 0x00,
    /// Working inside a parallel region.
    WorkParallel = 0x01,
    /// Performing a reduction.
    WorkReduction = 0x02,
    /// Waiting for work.
    Idle = 0x10,
    /// Non-wait runtime overhead.
    Overhead = 0x20,
    /// Waiting at a generic barrier.
    WaitBarrier = 0x40,
    /// Waiting at an implicit barrier.
    WaitBarrierImplicit = 0x41,
    /// Waiting at an explicit barrier.
    WaitBarrierExplicit = 0x42,
    /// Waiting at a taskwait.
    WaitTaskwait = 0x50,
    /// Waiting at a taskgroup.
    WaitTaskgroup = 0x51,
    /// Waiting for a lock.
    WaitLock = 0x60,
    /// Waiting for a nestable lock.
    WaitNestLock = 0x61,
    /// Waiting to enter a critical section.
    WaitCritical = 0x62,
    /// Waiting to perform an atomic update.
    WaitAtomic = 0x63,
    /// Waiting at an ordered construct.
    WaitOrdered = 0x64,
    /// Thread state is not known.
    Undefined = 0x70,
    /// Enumeration sentinel; never a real thread state.
    First = 0x71,
}

impl ExecState {
    /// Every state, in the fixed enumeration order tools iterate with
    /// [`crate::inquiry::enumerate_state`].
    pub const ALL: [Self; 17] = [
        Self::WorkSerial,
        Self::WorkParallel,
        Self::WorkReduction,
        Self::Idle,
        Self::Overhead,
        Self::WaitBarrier,
        Self::WaitBarrierImplicit,
        Self::WaitBarrierExplicit,
        Self::WaitTaskwait,
        Self::WaitTaskgroup,
        Self::WaitLock,
        Self::WaitNestLock,
        Self::WaitCritical,
        Self::WaitAtomic,
        Self::WaitOrdered,
        Self::Undefined,
        Self::First,
    ];

    /// Returns the stable numeric encoding.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Decodes a raw state value, `None` for anything outside the closed set.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.raw() == raw)
    }

    /// Returns true for any wait state (barrier, task, or mutex family).
    ///
    /// The wait id reported alongside a thread state is meaningful only when
    /// this is true.
    #[must_use]
    pub const fn is_wait(self) -> bool {
        matches!(
            self,
            Self::WaitBarrier
                | Self::WaitBarrierImplicit
                | Self::WaitBarrierExplicit
                | Self::WaitTaskwait
                | Self::WaitTaskgroup
                | Self::WaitLock
                | Self::WaitNestLock
                | Self::WaitCritical
                | Self::WaitAtomic
                | Self::WaitOrdered
        )
    }

    /// Canonical name, as delivered during state enumeration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WorkSerial => "work_serial",
            Self::WorkParallel => "work_parallel",
            Self::WorkReduction => "work_reduction",
            Self::Idle => "idle",
            Self::Overhead => "overhead",
            Self::WaitBarrier => "wait_barrier",
            Self::WaitBarrierImplicit => "wait_barrier_implicit",
            Self::WaitBarrierExplicit => "wait_barrier_explicit",
            Self::WaitTaskwait => "wait_taskwait",
            Self::WaitTaskgroup => "wait_taskgroup",
            Self::WaitLock => "wait_lock",
            Self::WaitNestLock => "wait_nest_lock",
            Self::WaitCritical => "wait_critical",
            Self::WaitAtomic => "wait_atomic",
            Self::WaitOrdered => "wait_ordered",
            Self::Undefined => "undefined",
            Self::First => "first",
        }
    }
}

impl fmt::Display for ExecState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
