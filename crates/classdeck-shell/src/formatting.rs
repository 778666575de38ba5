use classdeck_bridge::assistant::AssistantUsage;
use classdeck_bridge::notification::NotificationKind;
use classdeck_notify::Notification;

/// Short label for a notification kind, used as a prefix in the log-based
/// renderer.
pub fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "success",
        NotificationKind::Warning => "warning",
        NotificationKind::Error => "error",
    }
}

/// Formats a notification as a single display line.
pub fn format_notification(notification: &Notification) -> String {
    match &notification.message {
        Some(message) => format!(
            "[{}] {}: {}",
            kind_label(notification.kind),
            notification.title,
            message
        ),
        None => format!("[{}] {}", kind_label(notification.kind), notification.title),
    }
}

/// Formats assistant quota usage as a single display line.
pub fn format_quota(usage: &AssistantUsage) -> String {
    format!(
        "{}/{} assistant messages used ({}%)",
        usage.used,
        usage.limit,
        usage.percent_used()
    )
}
