//! Session lifecycle: startup restore, sign-in, sign-out.
//!
//! Every path through this module ends with a
//! [`SessionUpdate`](classdeck_bridge::session::SessionUpdate), so the shell
//! always leaves its "session resolving" state no matter how a request went.

use classdeck_bridge::MessageFromBackend;
use classdeck_bridge::notification::{NotificationKind, NotificationMessage};
use classdeck_bridge::session::SessionUpdate;

use crate::api::ApiError;

/// Attempts to restore the previous session from the stored token at
/// startup. Without a token, or when the platform rejects it, the session
/// settles as signed-out.
pub async fn restore_session(context: super::AppContextHandle) {
    let (api, token) = {
        let state = context.state.read().await;
        (state.api.clone(), state.config.session.token.clone())
    };

    let Some(token) = token else {
        context
            .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedOut))
            .await;
        return;
    };

    match api.current_session(&token).await {
        Ok(identity) => {
            log::info!("Restored session for {}", identity.display_name);
            {
                let mut state = context.state.write().await;
                state.identity = Some(identity.clone());
            }
            context
                .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedIn(
                    identity,
                )))
                .await;
        }
        Err(error) => {
            log::warn!("Session restore failed: {error}");
            forget_token(&context).await;
            if matches!(error, ApiError::Unauthorized) {
                context
                    .send_notification(NotificationMessage::new(
                        NotificationKind::Warning,
                        "Your session has expired",
                    ))
                    .await;
            } else {
                context
                    .send_error_notification("Could not restore your session", error)
                    .await;
            }
            context
                .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedOut))
                .await;
        }
    }
}

/// Handles a sign-in request (see
/// [`classdeck_bridge::MessageToBackend::SignInRequest`]).
pub async fn handle_sign_in(context: super::AppContextHandle, email: String, password: String) {
    let api = {
        let state = context.state.read().await;
        state.api.clone()
    };

    match api.sign_in(&email, &password).await {
        Ok(response) => {
            let config = {
                let mut state = context.state.write().await;
                state.identity = Some(response.user.clone());
                state.config.session.token = Some(response.token);
                state.config.clone()
            };
            if let Err(error) = crate::config::save_config(&config).await {
                log::error!("Failed to persist the session token: {error}");
            }

            context
                .send_notification(NotificationMessage::new(
                    NotificationKind::Success,
                    format!("Signed in as {}", response.user.display_name),
                ))
                .await;
            context
                .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedIn(
                    response.user,
                )))
                .await;
        }
        Err(ApiError::Unauthorized) => {
            context
                .send_notification(
                    NotificationMessage::new(NotificationKind::Error, "Sign-in failed")
                        .with_detail("Check your email and password."),
                )
                .await;
            context
                .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedOut))
                .await;
        }
        Err(error) => {
            context.send_error_notification("Sign-in failed", error).await;
            context
                .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedOut))
                .await;
        }
    }
}

/// Handles a sign-out request (see
/// [`classdeck_bridge::MessageToBackend::SignOutRequest`]).
pub async fn handle_sign_out(context: super::AppContextHandle) {
    forget_token(&context).await;
    context
        .send_notification(NotificationMessage::new(
            NotificationKind::Info,
            "Signed out",
        ))
        .await;
    context
        .send(MessageFromBackend::SessionUpdate(SessionUpdate::SignedOut))
        .await;
}

/// Drops the in-memory identity and the persisted token.
async fn forget_token(context: &super::AppContextHandle) {
    let config = {
        let mut state = context.state.write().await;
        state.identity = None;
        state.config.session.token = None;
        state.config.clone()
    };
    if let Err(error) = crate::config::save_config(&config).await {
        log::error!("Failed to clear the persisted session token: {error}");
    }
}
