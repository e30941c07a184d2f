//! Communication bridge between notification producers and the surface that
//! renders them.
//!
//! This crate defines a small named-event publish/subscribe hub, the
//! notification payload types routed through it, and the configuration types
//! shared by the surface and the application binary.
//!
//! The design is deliberately lightweight:
//! - Producers publish a payload under an event name and never learn who
//!   (if anyone) is listening.
//! - Subscribers register plain closures and are invoked synchronously, on
//!   the publishing thread, in registration order.
//!
//! Nothing is queued or retried. A publish with no subscribers is dropped.

pub mod config;
pub mod notification;

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// Handle returned by [`EventBridge::subscribe`], used to unsubscribe later.
///
/// Closures have no identity of their own, so the handle stands in for the
/// handler reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;

struct Registry<P> {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<String, Vec<(SubscriptionId, Handler<P>)>>>,
}

impl<P> Registry<P> {
    fn handlers(&self) -> MutexGuard<'_, HashMap<String, Vec<(SubscriptionId, Handler<P>)>>> {
        // handlers never run while the lock is held, so a poisoned map is still consistent
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared publish/subscribe hub keyed by event name.
///
/// Cloning an `EventBridge` is cheap and every clone shares the same
/// registry, so one instance can be constructed at startup and handed to
/// every module that needs to publish or subscribe.
pub struct EventBridge<P> {
    registry: Arc<Registry<P>>,
}

impl<P> EventBridge<P> {
    /// Creates a bridge with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(1),
                handlers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Registers `handler` to be called on every [`publish`](Self::publish)
    /// of `event_name`.
    pub fn subscribe<F>(&self, event_name: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let event_name = event_name.into();
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        log::debug!("Subscribing {id:?} to {event_name:?}");
        self.registry
            .handlers()
            .entry(event_name)
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Removes a previously registered handler.
    ///
    /// Returns `false` when nothing was registered under `id` for
    /// `event_name`, which is not an error.
    pub fn unsubscribe(&self, event_name: &str, id: SubscriptionId) -> bool {
        let mut handlers = self.registry.handlers();
        let Some(list) = handlers.get_mut(event_name) else {
            return false;
        };

        let before = list.len();
        list.retain(|(registered, _)| *registered != id);
        let removed = list.len() != before;
        if list.is_empty() {
            handlers.remove(event_name);
        }

        if removed {
            log::debug!("Unsubscribed {id:?} from {event_name:?}");
        }
        removed
    }

    /// Invokes every handler currently registered for `event_name` with
    /// `payload`, in registration order, before returning.
    ///
    /// Handlers see a snapshot of the registry taken at the start of the
    /// call: subscriptions changed from inside a handler apply to the next
    /// publish.
    pub fn publish(&self, event_name: &str, payload: &P) {
        let snapshot: Vec<Handler<P>> = match self.registry.handlers().get(event_name) {
            Some(list) => list.iter().map(|(_, handler)| handler.clone()).collect(),
            None => Vec::new(),
        };

        log::debug!(
            "Publishing {event_name:?} to {} subscriber(s)",
            snapshot.len()
        );
        for handler in snapshot {
            handler(payload);
        }
    }

    /// Returns how many handlers are registered for `event_name`.
    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.registry
            .handlers()
            .get(event_name)
            .map_or(0, Vec::len)
    }
}

impl<P> Clone for EventBridge<P> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<P> Default for EventBridge<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventBridge<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events: Vec<String> = self.registry.handlers().keys().cloned().collect();
        f.debug_struct("EventBridge")
            .field("events", &events)
            .finish()
    }
}
