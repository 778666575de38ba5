//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notifications back to the shell bridge.

use std::sync::Arc;

use classdeck_bridge::notification::{NotificationKind, NotificationMessage};
use classdeck_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the shell bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the shell bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a shell message: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches the received message from the shell down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::SignInRequest { email, password } => {
                services::session_service::handle_sign_in(self.clone(), email, password).await;
            }
            MessageToBackend::SignOutRequest => {
                services::session_service::handle_sign_out(self.clone()).await;
            }
            MessageToBackend::DashboardRequest => {
                services::dashboard_service::handle_dashboard_request(self.clone()).await;
            }
            MessageToBackend::AssistantPromptRequest { prompt } => {
                services::assistant_service::handle_prompt(self.clone(), prompt).await;
            }
        }
    }

    /// Send a message to the shell bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        self.tx
            .send(message)
            .await
            .expect("failed to send message to the shell");
    }

    /// Send a notification message to the shell bridge.
    pub async fn send_notification(&self, message: NotificationMessage) {
        self.send(MessageFromBackend::NotificationMessage(message))
            .await;
    }

    /// Send an error notification built from a title and an error's display
    /// text.
    pub async fn send_error_notification(
        &self,
        title: impl Into<String>,
        error: impl std::fmt::Display,
    ) {
        self.send_notification(
            NotificationMessage::new(NotificationKind::Error, title)
                .with_detail(error.to_string()),
        )
        .await;
    }
}
