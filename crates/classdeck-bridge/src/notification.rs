/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent and visual styling,
/// allowing the shell to display them appropriately and to pick a default
/// lifetime for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Error,
}

/// A notification payload intended for the user interface.
///
/// The backend only describes the message; the shell's notification center
/// assigns identifiers, lifetimes, and dismissal behavior.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// The kind/severity of the notification, determining its visual style
    /// and default lifetime.
    pub kind: NotificationKind,
    /// Short headline shown to the user.
    pub title: String,
    /// Optional longer detail text.
    pub detail: Option<String>,
}

impl NotificationMessage {
    /// Convenience constructor for a notification without detail text.
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: None,
        }
    }

    /// Attaches detail text to the notification.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
