//! Bounded, TTL-expiring notification center for the client shell.
//!
//! This crate owns the in-memory queue of user-facing messages. It focuses
//! on three guarantees:
//! - The live queue never holds more than [`QUEUE_CAPACITY`] notifications;
//!   overflow evicts the oldest entry first.
//! - Every notification with a finite lifetime removes itself when the
//!   lifetime elapses, independent of other entries' timers.
//! - Removal is idempotent, so a timer firing after a manual dismissal is
//!   harmless.
//!
//! Timers are explicit task records owned by the center and cancelled on
//! removal, eviction, and [`clear`](center::NotificationCenter::clear), so
//! high churn does not accumulate stale timers.

pub mod center;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use classdeck_bridge::notification::NotificationKind;

/// Maximum number of notifications held live at once.
pub const QUEUE_CAPACITY: usize = 5;

/// Opaque identifier assigned to a notification at insertion.
///
/// Identity is solely by id; two notifications may share all visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl NotificationId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// An optional action button attached to a notification.
#[derive(Clone)]
pub struct NotificationAction {
    /// Label shown on the action control.
    pub label: String,
    on_activate: Arc<dyn Fn() + Send + Sync>,
}

impl NotificationAction {
    /// Creates an action with the given label and activation callback.
    pub fn new(label: impl Into<String>, on_activate: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_activate: Arc::new(on_activate),
        }
    }

    /// Runs the action's callback.
    pub fn activate(&self) {
        (self.on_activate)();
    }
}

impl fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A live notification as held by the center and shown by renderers.
///
/// Notifications are immutable once created; the only lifecycle transition
/// is removal from the queue.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Identifier assigned at insertion.
    pub id: NotificationId,
    /// Severity/category of the message.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Optional longer detail text.
    pub message: Option<String>,
    /// Time-to-live. `None` means the notification is never auto-dismissed.
    pub ttl: Option<Duration>,
    /// Whether a manual close control is shown.
    pub dismissible: bool,
    /// Optional action button.
    pub action: Option<NotificationAction>,
}

/// Default lifetime for a notification of the given kind.
///
/// Errors stay around longer than the rest so the user has a chance to read
/// them; warnings sit in between.
pub fn default_ttl(kind: NotificationKind) -> Duration {
    match kind {
        NotificationKind::Error => Duration::from_millis(8000),
        NotificationKind::Warning => Duration::from_millis(6000),
        NotificationKind::Success | NotificationKind::Info => Duration::from_millis(5000),
    }
}

/// A notification request before insertion: everything except the id.
///
/// The lifetime is optional; when unspecified the kind's
/// [`default_ttl`] applies. An explicit zero duration makes the
/// notification sticky (never auto-dismissed).
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    pub ttl: Option<Duration>,
    pub dismissible: bool,
    pub action: Option<NotificationAction>,
}

impl NotificationDraft {
    /// Starts a draft with the given kind and title.
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            ttl: None,
            dismissible: true,
            action: None,
        }
    }

    /// Shorthand for a success draft.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    /// Shorthand for an error draft.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    /// Shorthand for a warning draft.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, title)
    }

    /// Shorthand for an info draft.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title)
    }

    /// Attaches detail text.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Overrides the kind-default lifetime. `Duration::ZERO` makes the
    /// notification sticky.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Makes the notification sticky: it stays until dismissed or evicted.
    pub fn sticky(self) -> Self {
        self.ttl(Duration::ZERO)
    }

    /// Controls whether a manual close control is shown.
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    /// Attaches an action button.
    pub fn action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Resolves the effective lifetime: the explicit override when present,
    /// the kind default otherwise, with zero meaning "never".
    pub(crate) fn effective_ttl(&self) -> Option<Duration> {
        let ttl = self.ttl.unwrap_or_else(|| default_ttl(self.kind));
        if ttl.is_zero() { None } else { Some(ttl) }
    }
}

impl From<classdeck_bridge::notification::NotificationMessage> for NotificationDraft {
    fn from(message: classdeck_bridge::notification::NotificationMessage) -> Self {
        let mut draft = NotificationDraft::new(message.kind, message.title);
        draft.message = message.detail;
        draft
    }
}
