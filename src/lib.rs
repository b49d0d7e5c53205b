//! Parascope: typed event instrumentation for a fork-join parallel runtime.
//!
//! # Overview
//!
//! Parascope lets an external monitoring tool observe the lifecycle of a
//! parallel runtime — thread start/stop, parallel-region entry/exit, task
//! creation and switching, lock and barrier waits — through strongly-typed
//! callbacks, with a single relaxed atomic load of overhead when no tool is
//! attached.
//!
//! The design center is the event taxonomy: every [`Event`] classifies to
//! exactly one [`CallbackShape`], and a registered [`Callback`] is a tagged
//! union whose variant carries the exact argument signature for that shape.
//! Dispatch pattern-matches on the shape instead of reinterpreting an opaque
//! function pointer, so a signature mismatch is rejected at registration
//! time rather than corrupting a call frame at fire time.
//!
//! # Core Guarantees
//!
//! - **Total classification**: every event has a shape; there is no
//!   "unclassified" dispatch path
//! - **Typed invocation**: a callback can only ever be invoked with the
//!   argument list its variant declares
//! - **Cheap when idle**: a disabled monitor rejects `fire` on one atomic load
//! - **Sentinels, not errors**: absent context (no team, no ancestor, no
//!   current task) is reported as `NONE` ids, `-1` sizes, or `None` frames
//! - **Owned state**: all registration state lives in a [`Monitor`] instance;
//!   independent runtimes (e.g. in tests) cannot contaminate each other
//!
//! # Module Structure
//!
//! - [`types`]: Public id newtypes, thread kinds, frames, execution states
//! - [`event`]: The event taxonomy and its shape classification
//! - [`callback`]: The typed callback union
//! - [`record`]: The runtime records the engine reads (threads, tasks, teams)
//! - [`monitor`]: The instrumentation context and registration table
//! - [`inquiry`]: Read-only introspection for attached tools
//! - [`control`]: Start/pause/flush/permanently-off command handling
//! - [`lookup`]: Name-to-function discovery for dynamically attached tools
//! - [`config`]: Environment-driven bootstrap status
//! - [`error`]: Error types
//! - [`util`]: Generational arena for runtime records

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]

pub mod callback;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod inquiry;
pub mod lookup;
pub mod monitor;
pub mod record;
pub mod tracing_compat;
pub mod types;
pub mod util;

mod context;
mod dispatch;

pub use callback::Callback;
pub use config::{ToolStatus, ENV_TOOL};
pub use control::ControlCommand;
pub use error::{ConfigError, MonitorError};
pub use event::{CallbackShape, Event};
pub use inquiry::{enumerate_state, NextState};
pub use lookup::{lookup, InterfaceFn};
pub use monitor::Monitor;
pub use record::{
    BindingGuard, ExecMode, PendingParallel, RuntimeTables, SharedTables, TaskRecord,
    TaskSwitchIds, TeamRecord, ThreadRecord,
};
pub use types::{
    EntryPoint, ExecState, FrameRecord, ParallelId, TaskId, ThreadId, ThreadKind, WaitId,
};
