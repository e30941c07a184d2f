//! The notification surface and its per-entry removal timers.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use agenda_bridge::{
    EventBridge, SubscriptionId,
    config::NotificationsConfig,
    notification::{NotificationPayload, SHOW_NOTIFICATION},
};
use tokio::{
    runtime::{Handle, TryCurrentError},
    sync::watch,
    task::AbortHandle,
};

use crate::entry::{EntryId, NotificationEntry};

/// Errors that can occur while mounting a [`NotificationSurface`].
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    /// The surface was mounted outside of a tokio runtime, so auto-removal
    /// timers could not be scheduled.
    #[error("notification surface must be mounted inside a tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

/// State shared between the surface, its bridge handler and its timers.
struct Inner {
    next_id: AtomicU64,
    visible: watch::Sender<Vec<NotificationEntry>>,
    timers: Mutex<HashMap<EntryId, AbortHandle>>,
    dismiss_after: Duration,
    runtime: Handle,
}

impl Inner {
    fn timers(&self) -> MutexGuard<'_, HashMap<EntryId, AbortHandle>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a new entry and schedules its auto-removal.
    fn append(self: &Arc<Self>, payload: &NotificationPayload) -> EntryId {
        let id = EntryId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = NotificationEntry::from_payload(id, payload);
        log::debug!("Showing notification {id} ({})", entry.kind());

        // held until the timer is registered, so an expiring timer always finds its handle
        let mut timers = self.timers();
        self.visible.send_modify(|list| list.push(entry));

        let state = Arc::downgrade(self);
        let delay = self.dismiss_after;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(state) = Weak::upgrade(&state) {
                state.expire(id);
            }
        });
        timers.insert(id, task.abort_handle());
        id
    }

    /// Timer path: the task is finishing on its own, so its handle is only
    /// forgotten.
    fn expire(&self, id: EntryId) {
        let _ = self.timers().remove(&id);
        if self.remove_entry(id) {
            log::debug!("Notification {id} expired");
        }
    }

    /// Dismissal path: cancels the pending timer before removing the entry.
    fn dismiss(&self, id: EntryId) -> bool {
        let timer = self.timers().remove(&id);
        if let Some(timer) = timer {
            timer.abort();
        }

        let removed = self.remove_entry(id);
        if removed {
            log::debug!("Notification {id} dismissed");
        }
        removed
    }

    /// Filters `id` out of the visible list. Observers are only woken when
    /// an entry was actually removed.
    fn remove_entry(&self, id: EntryId) -> bool {
        self.visible.send_if_modified(|list| {
            let before = list.len();
            list.retain(|entry| entry.id() != id);
            list.len() != before
        })
    }

    fn cancel_timers(&self) {
        for (_, timer) in self.timers().drain() {
            timer.abort();
        }
    }

    /// Drops every entry together with its timer. The timer map stays locked
    /// until the list is empty, same as in `append`.
    fn clear(&self) -> bool {
        let mut timers = self.timers();
        for (_, timer) in timers.drain() {
            timer.abort();
        }
        self.visible.send_if_modified(|list| {
            let had_entries = !list.is_empty();
            list.clear();
            had_entries
        })
    }
}

/// Owns the list of currently visible notifications.
///
/// Mounting subscribes the surface to [`SHOW_NOTIFICATION`] on the bridge;
/// every received payload becomes a [`NotificationEntry`] appended to the end
/// of the list and removed again after the configured delay or when it is
/// dismissed. Dropping the surface (or calling [`unmount`](Self::unmount))
/// unsubscribes it and cancels all pending timers.
///
/// The rendering layer observes the list through [`watch`](Self::watch).
pub struct NotificationSurface {
    bridge: EventBridge<NotificationPayload>,
    subscription: Option<SubscriptionId>,
    inner: Arc<Inner>,
}

impl NotificationSurface {
    /// Subscribes a new surface to the bridge. Timers are scheduled on the
    /// tokio runtime this is called from.
    pub fn mount(
        bridge: &EventBridge<NotificationPayload>,
        config: &NotificationsConfig,
    ) -> Result<Self, MountError> {
        let runtime = Handle::try_current()?;
        let (visible, _) = watch::channel(Vec::new());
        let inner = Arc::new(Inner {
            next_id: AtomicU64::new(1),
            visible,
            timers: Mutex::new(HashMap::new()),
            dismiss_after: config.dismiss_after(),
            runtime,
        });

        let state = Arc::downgrade(&inner);
        let subscription = bridge.subscribe(SHOW_NOTIFICATION, move |payload| {
            if let Some(state) = state.upgrade() {
                state.append(payload);
            }
        });
        log::info!(
            "Notification surface mounted, entries expire after {:?}",
            inner.dismiss_after
        );

        Ok(Self {
            bridge: bridge.clone(),
            subscription: Some(subscription),
            inner,
        })
    }

    /// Tears the surface down. Equivalent to dropping it.
    pub fn unmount(self) {
        drop(self);
    }

    /// Removes the entry with `id`, cancelling its auto-removal timer.
    ///
    /// Returns `false` if no such entry is visible; calling this again for
    /// the same id is harmless.
    pub fn remove(&self, id: EntryId) -> bool {
        self.inner.dismiss(id)
    }

    /// Removes every visible entry at once.
    pub fn clear(&self) {
        if self.inner.clear() {
            log::debug!("Notification surface cleared");
        }
    }

    /// Returns a receiver that is marked changed on every append and every
    /// effective removal.
    pub fn watch(&self) -> watch::Receiver<Vec<NotificationEntry>> {
        self.inner.visible.subscribe()
    }

    /// Snapshot of the visible entries in display order.
    pub fn entries(&self) -> Vec<NotificationEntry> {
        self.inner.visible.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.visible.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.visible.borrow().is_empty()
    }

    /// Number of auto-removal timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.inner.timers().len()
    }
}

impl Drop for NotificationSurface {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.bridge.unsubscribe(SHOW_NOTIFICATION, subscription);
        }
        self.inner.cancel_timers();
        log::info!("Notification surface unmounted");
    }
}

impl std::fmt::Debug for NotificationSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSurface")
            .field("subscription", &self.subscription)
            .field("entries", &*self.inner.visible.borrow())
            .field("dismiss_after", &self.inner.dismiss_after)
            .finish()
    }
}
