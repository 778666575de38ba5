use classdeck_bridge::MessageFromBackend;
use classdeck_bridge::notification::{NotificationKind, NotificationMessage};

/// Handles an incoming dashboard request (see
/// [`classdeck_bridge::MessageToBackend::DashboardRequest`]).
pub async fn handle_dashboard_request(context: super::AppContextHandle) {
    let (api, token) = {
        let state = context.state.read().await;
        (state.api.clone(), state.config.session.token.clone())
    };

    let Some(token) = token else {
        context
            .send_notification(NotificationMessage::new(
                NotificationKind::Warning,
                "Sign in to view your dashboard",
            ))
            .await;
        return;
    };

    match api.dashboard(&token).await {
        Ok(summary) => {
            log::debug!(
                "Dashboard loaded: {} courses, {} pending assignments",
                summary.courses.len(),
                summary.pending_assignments
            );
            context
                .send(MessageFromBackend::DashboardResponse(summary))
                .await;
        }
        Err(error) => {
            context
                .send_error_notification("Could not load your dashboard", error)
                .await;
        }
    }
}
