//! The instrumentation context: registration table and gating flags.
//!
//! A [`Monitor`] owns everything a tool attachment needs: one callback slot
//! per event, the monitoring flag that gates dispatch, the initialized flag
//! the control interface honors, and a handle to the runtime tables it
//! reads context from. There is no process-global state — independent
//! runtimes (and tests) construct independent monitors.
//!
//! # Registration and concurrency
//!
//! Registration is expected to happen once, before parallel execution
//! begins. The slot table is lock-protected, so re-registering while events
//! fire is memory-safe, but it is still logically racy: an in-flight fire
//! may observe either the old or the new handler, non-deterministically.
//! The gating flags are plain relaxed atomics for the same reason — the
//! hot path is a single relaxed load.

use crate::callback::Callback;
use crate::config::ToolStatus;
use crate::error::ConfigError;
use crate::event::Event;
use crate::record::{RuntimeTables, SharedTables};
use crate::tracing_compat::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// One slot per event; slot 0 is unused so slots index by raw event number.
const SLOT_COUNT: usize = Event::MAX_RAW as usize + 1;

/// The instrumentation context shared by the host runtime and an attached
/// tool.
pub struct Monitor {
    slots: RwLock<Box<[Option<Callback>]>>,
    monitoring: AtomicBool,
    initialized: AtomicBool,
    runtime: SharedTables,
}

impl Monitor {
    /// Creates an initialized monitor over the given runtime tables.
    ///
    /// [`ToolStatus::Enabled`] starts in the active control state
    /// (monitoring on); [`ToolStatus::Disabled`] starts inactive, and a
    /// later `StartRestart` command activates it.
    #[must_use]
    pub fn new(runtime: SharedTables, status: ToolStatus) -> Self {
        Self {
            slots: RwLock::new(vec![None; SLOT_COUNT].into_boxed_slice()),
            monitoring: AtomicBool::new(matches!(status, ToolStatus::Enabled)),
            initialized: AtomicBool::new(true),
            runtime,
        }
    }

    /// Creates a monitor whose initial state is read from the
    /// [`crate::ENV_TOOL`] environment variable.
    ///
    /// An unrecognized setting is a fatal configuration error; the host is
    /// expected to abort on it rather than continue with instrumentation in
    /// an unknown state.
    pub fn from_env(runtime: SharedTables) -> Result<Self, ConfigError> {
        Ok(Self::new(runtime, ToolStatus::from_env()?))
    }

    /// The runtime tables this monitor reads context from.
    #[must_use]
    pub fn runtime(&self) -> &SharedTables {
        &self.runtime
    }

    /// Whether event dispatch is currently enabled.
    #[must_use]
    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::Relaxed)
    }

    /// Whether the monitor still honors control commands.
    ///
    /// False only before bootstrap or after a `PermanentlyOff` command;
    /// once cleared it is never set again on this instance.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    /// Registers `callback` for `event`, replacing any previous handler.
    ///
    /// Returns `false` — and stores nothing — when the callback's shape
    /// disagrees with the event's classification. The shape check is what
    /// makes later dispatch unconditionally type-correct.
    pub fn set_callback(&self, event: Event, callback: Callback) -> bool {
        if callback.shape() != event.shape() {
            warn!(
                "rejecting {:?} handler for {:?}: event classifies as {:?}",
                callback.shape(),
                event,
                event.shape()
            );
            return false;
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots[event.raw() as usize] = Some(callback);
        true
    }

    /// Registers a callback by raw event number.
    ///
    /// Out-of-range numbers return `false` without panicking, so generic
    /// instrumentation code may probe speculatively.
    pub fn set_callback_raw(&self, raw: u32, callback: Callback) -> bool {
        Event::from_raw(raw).is_some_and(|event| self.set_callback(event, callback))
    }

    /// Removes the handler for `event`, returning whether one was present.
    pub fn clear_callback(&self, event: Event) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots[event.raw() as usize].take().is_some()
    }

    /// The currently registered handler for `event`, if any.
    #[must_use]
    pub fn get_callback(&self, event: Event) -> Option<Callback> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots[event.raw() as usize].clone()
    }

    /// Looks up a handler by raw event number; out of range yields `None`.
    #[must_use]
    pub fn get_callback_raw(&self, raw: u32) -> Option<Callback> {
        Event::from_raw(raw).and_then(|event| self.get_callback(event))
    }

    /// Sets the monitoring flag (control interface only).
    pub(crate) fn set_monitoring(&self, enabled: bool) {
        self.monitoring.store(enabled, Ordering::Relaxed);
    }

    /// Clears the initialized flag permanently (control interface only).
    pub(crate) fn clear_initialized(&self) {
        self.initialized.store(false, Ordering::Relaxed);
    }

    /// Runs `f` against the runtime tables under the read lock.
    ///
    /// Dispatch gathers context here and invokes the handler only after the
    /// guard is dropped, so handlers may re-enter the inquiry API freely.
    pub(crate) fn with_tables<R>(&self, f: impl FnOnce(&RuntimeTables) -> R) -> R {
        let guard = self.runtime.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RuntimeTables;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    fn monitor() -> Monitor {
        Monitor::new(RuntimeTables::shared(), ToolStatus::Enabled)
    }

    #[test]
    fn registration_round_trip() {
        let monitor = monitor();
        let hits = Arc::new(AtomicU32::new(0));
        let hits2 = Arc::clone(&hits);

        assert!(monitor.set_callback(
            Event::TaskEnd,
            Callback::task(move |_| {
                hits2.fetch_add(1, Ordering::SeqCst);
            })
        ));

        let stored = monitor.get_callback(Event::TaskEnd).expect("registered");
        if let Callback::Task(f) = &stored {
            f(crate::types::TaskId::new(1));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clearing_empties_the_slot() {
        let monitor = monitor();
        assert!(!monitor.clear_callback(Event::Flush));
        assert!(monitor.set_callback(Event::Flush, Callback::thread(|_| {})));
        assert!(monitor.clear_callback(Event::Flush));
        assert!(monitor.get_callback(Event::Flush).is_none());
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let monitor = monitor();
        // ThreadBegin classifies as ThreadType; a Wait handler must not stick.
        assert!(!monitor.set_callback(Event::ThreadBegin, Callback::wait(|_| {})));
        assert!(monitor.get_callback(Event::ThreadBegin).is_none());
    }

    #[test]
    fn raw_surface_rejects_out_of_range() {
        let monitor = monitor();
        assert!(!monitor.set_callback_raw(0, Callback::bare(|| {})));
        assert!(!monitor.set_callback_raw(Event::MAX_RAW + 1, Callback::bare(|| {})));
        assert!(monitor.get_callback_raw(0).is_none());
        assert!(monitor.get_callback_raw(999).is_none());

        assert!(monitor.set_callback_raw(Event::RuntimeShutdown.raw(), Callback::bare(|| {})));
        assert!(monitor.get_callback_raw(Event::RuntimeShutdown.raw()).is_some());
    }

    #[test]
    fn status_decides_initial_monitoring() {
        let active = Monitor::new(RuntimeTables::shared(), ToolStatus::Enabled);
        assert!(active.is_monitoring());
        assert!(active.is_initialized());

        let inactive = Monitor::new(RuntimeTables::shared(), ToolStatus::Disabled);
        assert!(!inactive.is_monitoring());
        assert!(inactive.is_initialized());
    }
}
