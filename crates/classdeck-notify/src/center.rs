//! The notification center: queue state, eviction, and removal timers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{Notification, NotificationDraft, NotificationId, QUEUE_CAPACITY};

/// A queued notification together with its scheduled removal, if any.
struct Entry {
    notification: Notification,
    /// Handle of the removal timer task. `None` for sticky notifications
    /// and for entries whose timer has not been registered yet.
    expiry: Option<JoinHandle<()>>,
}

struct Inner {
    entries: VecDeque<Entry>,
    next_id: u64,
}

/// The explicitly-owned container for live notifications.
///
/// All mutation goes through [`add`](Self::add), [`remove`](Self::remove),
/// and [`clear`](Self::clear); renderers observe the queue through
/// [`subscribe`](Self::subscribe) or [`snapshot`](Self::snapshot) and call
/// back into `remove` when the user dismisses an entry.
///
/// `add` must be called from within a tokio runtime, since finite-lifetime
/// notifications schedule their own removal as a spawned timer task.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Inner>>,
    changed: watch::Sender<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (changed, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: VecDeque::with_capacity(QUEUE_CAPACITY),
                next_id: 0,
            })),
            changed,
        }
    }

    /// Inserts a notification and returns its freshly assigned id.
    ///
    /// When the queue is at capacity the oldest entry is evicted first,
    /// strictly by insertion order. If the draft resolves to a finite
    /// lifetime, a removal of exactly this id is scheduled to run after the
    /// lifetime elapses.
    pub fn add(&self, draft: NotificationDraft) -> NotificationId {
        let ttl = draft.effective_ttl();

        let id = {
            let mut inner = self.lock();
            let id = NotificationId::new(inner.next_id);
            inner.next_id += 1;

            if inner.entries.len() >= QUEUE_CAPACITY
                && let Some(evicted) = inner.entries.pop_front()
            {
                log::debug!(
                    "Notification queue full; evicting {}",
                    evicted.notification.id
                );
                abort_expiry(evicted);
            }

            inner.entries.push_back(Entry {
                notification: Notification {
                    id,
                    kind: draft.kind,
                    title: draft.title,
                    message: draft.message,
                    ttl,
                    dismissible: draft.dismissible,
                    action: draft.action,
                },
                expiry: None,
            });
            self.publish(&inner);
            id
        };

        if let Some(ttl) = ttl {
            self.schedule_removal(id, ttl);
        }

        id
    }

    /// Removes the notification with the given id, cancelling its timer.
    ///
    /// Removing an absent id is a no-op, which makes removal idempotent and
    /// lets late timers fire harmlessly.
    pub fn remove(&self, id: NotificationId) {
        let mut inner = self.lock();
        let Some(index) = inner
            .entries
            .iter()
            .position(|entry| entry.notification.id == id)
        else {
            return;
        };
        if let Some(entry) = inner.entries.remove(index) {
            abort_expiry(entry);
        }
        self.publish(&inner);
    }

    /// Empties the queue immediately, cancelling every pending timer.
    pub fn clear(&self) {
        let mut inner = self.lock();
        for entry in inner.entries.drain(..) {
            abort_expiry(entry);
        }
        self.publish(&inner);
    }

    /// Current queue contents, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock()
            .entries
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Number of live notifications.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Subscribes to queue updates. The receiver always starts from the
    /// current contents and sees every mutation afterwards.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.changed.subscribe()
    }

    /// Spawns the removal timer for `id` and registers its handle so that
    /// `remove`/`clear`/eviction can cancel it.
    fn schedule_removal(&self, id: NotificationId, ttl: Duration) {
        let weak = Arc::downgrade(&self.inner);
        let changed = self.changed.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            remove_expired(&weak, &changed, id);
        });

        let mut inner = self.lock();
        match inner
            .entries
            .iter_mut()
            .find(|entry| entry.notification.id == id)
        {
            Some(entry) => entry.expiry = Some(handle),
            // Already gone (evicted or removed between unlock and here);
            // the timer would be a harmless no-op, but cancel it anyway.
            None => handle.abort(),
        }
    }

    fn publish(&self, inner: &Inner) {
        self.changed.send_replace(
            inner
                .entries
                .iter()
                .map(|entry| entry.notification.clone())
                .collect(),
        );
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .expect("notification center lock poisoned")
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer-side removal. Runs after a notification's lifetime elapses; a
/// missing id means the entry was already dismissed or evicted.
fn remove_expired(
    inner: &Weak<Mutex<Inner>>,
    changed: &watch::Sender<Vec<Notification>>,
    id: NotificationId,
) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut inner = inner.lock().expect("notification center lock poisoned");
    let Some(index) = inner
        .entries
        .iter()
        .position(|entry| entry.notification.id == id)
    else {
        return;
    };
    inner.entries.remove(index);
    changed.send_replace(
        inner
            .entries
            .iter()
            .map(|entry| entry.notification.clone())
            .collect(),
    );
}

fn abort_expiry(entry: Entry) {
    if let Some(handle) = entry.expiry {
        handle.abort();
    }
}
