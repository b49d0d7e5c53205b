//! The dispatch engine: from lifecycle point to typed handler invocation.
//!
//! `fire` is the single entry point the host runtime calls at each
//! lifecycle point. The common path — monitoring off, or nothing
//! registered — returns after one relaxed atomic load and at most one slot
//! read. When a handler is registered, the event's shape selects which
//! slice of runtime context to assemble, the tables lock is dropped, and
//! the handler runs synchronously on the firing thread.
//!
//! Context assembly is sentinel-tolerant: an absent team, task, ancestor,
//! or announcement becomes a `NONE` id or `None` option, matching the
//! inquiry surface. The two shapes that exist purely to describe the
//! calling thread's record (`ThreadType`, `Wait`) skip dispatch when the
//! calling thread has no bound record, since their arguments would be
//! meaningless.

use crate::callback::Callback;
use crate::context;
use crate::event::{CallbackShape, Event};
use crate::monitor::Monitor;
use crate::record;
use crate::tracing_compat::trace;
use crate::types::{ParallelId, TaskId};

impl Monitor {
    /// Announces a lifecycle event to the registered handler, if any.
    ///
    /// No-op when monitoring is disabled or no handler is registered for
    /// `event`. The handler executes in-line on the calling thread; its
    /// side effects are entirely the tool's responsibility.
    pub fn fire(&self, event: Event) {
        if !self.is_monitoring() {
            return;
        }
        let Some(callback) = self.get_callback(event) else {
            return;
        };
        self.dispatch(event, &callback);
    }

    /// Announces an event by raw number.
    ///
    /// Out-of-range numbers are ignored, so generic instrumentation code
    /// may fire speculatively without knowing the full event range.
    pub fn fire_raw(&self, raw: u32) {
        if !self.is_monitoring() {
            return;
        }
        let Some(event) = Event::from_raw(raw) else {
            return;
        };
        let Some(callback) = self.get_callback(event) else {
            return;
        };
        self.dispatch(event, &callback);
    }

    fn dispatch(&self, event: Event, callback: &Callback) {
        match event.shape() {
            CallbackShape::Bare => {
                let Callback::Bare(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                f();
            }

            CallbackShape::Thread => {
                let Callback::Thread(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                f(context::current_thread_id());
            }

            CallbackShape::ThreadType => {
                let Callback::ThreadType(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let Some((kind, id)) = self.with_tables(|tables| {
                    let index = record::current_binding()?;
                    let thread = tables.thread(index)?;
                    Some((thread.kind, context::public_thread_id(index)))
                }) else {
                    trace!("skipping {:?}: calling thread has no record", event);
                    return;
                };
                f(kind, id);
            }

            CallbackShape::Wait => {
                let Callback::Wait(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let Some(wait_id) = self.with_tables(|tables| {
                    Some(tables.thread(record::current_binding()?)?.wait_id)
                }) else {
                    trace!("skipping {:?}: calling thread has no record", event);
                    return;
                };
                f(wait_id);
            }

            CallbackShape::Parallel => {
                let Callback::Parallel(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let (region, task) = self.with_tables(|tables| {
                    let region = record::current_binding()
                        .and_then(|index| context::ancestor_team(tables, index, 0))
                        .and_then(|team| tables.team(team))
                        .map_or(ParallelId::NONE, |team| team.region);
                    (region, tables.current_task_id())
                });
                f(region, task);
            }

            CallbackShape::NewWorkshare => {
                let Callback::NewWorkshare(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let (region, task, entry) = self.with_tables(|tables| {
                    record::current_binding()
                        .and_then(|index| tables.thread(index))
                        .map_or((ParallelId::NONE, TaskId::NONE, None), |thread| {
                            let region = thread
                                .team
                                .and_then(|team| tables.team(team))
                                .map_or(ParallelId::NONE, |team| team.region);
                            let task = thread
                                .implicit_task
                                .and_then(|task| tables.task(task))
                                .map_or(TaskId::NONE, |task| task.id);
                            (region, task, thread.entry)
                        })
                });
                f(region, task, entry);
            }

            CallbackShape::NewParallel => {
                let Callback::NewParallel(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let (parent_id, parent_frame, pending) = self.with_tables(|tables| {
                    let parent = record::current_binding()
                        .and_then(|index| context::ancestor_task(tables, index, 1))
                        .and_then(|task| tables.task(task));
                    (
                        parent.map_or(TaskId::NONE, |task| task.id),
                        parent.map(|task| task.frame),
                        tables.pending_parallel(),
                    )
                });
                f(
                    parent_id,
                    parent_frame,
                    pending.region,
                    pending.team_size,
                    pending.entry,
                );
            }

            CallbackShape::Task => {
                let Callback::Task(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let task = self.with_tables(|tables| tables.current_task_id());
                f(task);
            }

            CallbackShape::TaskSwitch => {
                let Callback::TaskSwitch(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let switch = self.with_tables(|tables| tables.task_switch());
                f(switch.suspended, switch.resumed);
            }

            CallbackShape::NewTask => {
                let Callback::NewTask(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                let (parent_id, parent_frame, new_id, entry) = self.with_tables(|tables| {
                    let binding = record::current_binding();
                    let thread = binding.and_then(|index| tables.thread(index));
                    let new_id = thread
                        .and_then(|t| t.implicit_task)
                        .and_then(|task| tables.task(task))
                        .map_or(TaskId::NONE, |task| task.id);
                    let entry = thread.and_then(|t| t.entry);
                    let parent = binding
                        .and_then(|index| context::ancestor_task(tables, index, 1))
                        .and_then(|task| tables.task(task));
                    (
                        parent.map_or(TaskId::NONE, |task| task.id),
                        parent.map(|task| task.frame),
                        new_id,
                        entry,
                    )
                });
                f(parent_id, parent_frame, new_id, entry);
            }

            CallbackShape::Control => {
                // Control events are normally delivered by the control
                // interface with the real command words; a direct fire has
                // none to offer.
                let Callback::Control(f) = callback else {
                    return shape_mismatch(event, callback);
                };
                f(0, 0);
            }
        }
    }
}

/// A registered handler whose variant disagrees with its event's shape can
/// only mean registration-time validation was bypassed; treat as a
/// programming error.
fn shape_mismatch(event: Event, callback: &Callback) {
    debug_assert!(
        false,
        "slot for {event:?} holds {callback:?}, expected {:?}",
        event.shape()
    );
    trace!(
        "dropping {:?}: slot holds {:?}, expected {:?}",
        event,
        callback.shape(),
        event.shape()
    );
}
