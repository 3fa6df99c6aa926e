//! Synchronous publish/subscribe event bus.
//!
//! An `EventBus` is an explicitly constructed instance passed to every
//! component that publishes or subscribes; there is no process-wide singleton,
//! so tests run against isolated buses. Dispatch is single-threaded and
//! depth-first: a nested publish made by a handler completes before the outer
//! publish returns.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use super::{EventChannel, GameEvent};

type Handler = Rc<RefCell<dyn FnMut(&GameEvent)>>;

/// Handle returned by [`EventBus::subscribe`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    channel: EventChannel,
    id: u64,
}

/// Single-threaded event bus with per-subscriber failure isolation.
#[derive(Default)]
pub struct EventBus {
    channels: RefCell<HashMap<EventChannel, Vec<(u64, Handler)>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` on `channel`.
    ///
    /// No ordering is guaranteed between independent subscribers of the same
    /// channel; each handler runs to completion before `publish` returns.
    pub fn subscribe<F>(&self, channel: EventChannel, handler: F) -> SubscriptionHandle
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.channels
            .borrow_mut()
            .entry(channel)
            .or_default()
            .push((id, Rc::new(RefCell::new(handler))));
        SubscriptionHandle { channel, id }
    }

    /// Remove the subscription behind `handle`. Idempotent.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        if let Some(subs) = self.channels.borrow_mut().get_mut(&handle.channel) {
            subs.retain(|(id, _)| *id != handle.id);
        }
    }

    /// Synchronously dispatch `event` to every current subscriber of its
    /// channel on the calling thread.
    ///
    /// The subscriber list is snapshotted before dispatch, so handlers may
    /// subscribe, unsubscribe or publish further events while running. A
    /// handler that panics, or that is re-entered by its own nested publish,
    /// is skipped without blocking the remaining subscribers.
    pub fn publish(&self, event: &GameEvent) {
        let snapshot: Vec<(u64, Handler)> = self
            .channels
            .borrow()
            .get(&event.channel())
            .map(|subs| subs.to_vec())
            .unwrap_or_default();

        for (id, handler) in snapshot {
            let mut guard = match handler.try_borrow_mut() {
                Ok(guard) => guard,
                Err(_) => {
                    log::warn!(
                        "Subscriber {} on {:?} re-entered during its own dispatch, skipping",
                        id,
                        event.channel()
                    );
                    continue;
                }
            };
            if catch_unwind(AssertUnwindSafe(|| (*guard)(event))).is_err() {
                log::error!(
                    "Subscriber {} on {:?} panicked, continuing with remaining subscribers",
                    id,
                    event.channel()
                );
            }
        }
    }

    /// Number of live subscriptions on `channel`.
    pub fn subscriber_count(&self, channel: EventChannel) -> usize {
        self.channels.borrow().get(&channel).map_or(0, Vec::len)
    }
}
