//! Client application shell: session state, guarded navigation, and
//! notifications.
//!
//! The shell is the client-side half of the bridge. It owns the state the
//! presentation layer reads (session, current route, notification queue,
//! dashboard, assistant transcript) and applies backend events to it on a
//! single-threaded event loop, so every mutation runs to completion before
//! the next one starts.
//!
//! The visual layer is deliberately absent; a log-based renderer stands at
//! the presentation boundary and consumes the same interfaces a graphical
//! one would: the notification center's watch channel and the router's
//! current route.

pub mod formatting;
pub mod router;
pub mod shell;

use classdeck_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc;

pub use crate::shell::Shell;

/// Typed command senders for the backend side of the bridge.
#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    pub async fn request_config(&self) {
        self.to_backend
            .send(MessageToBackend::ConfigurationRequest)
            .await
            .expect("failed to request config");
    }

    pub async fn sign_in(&self, email: impl Into<String>, password: impl Into<String>) {
        self.to_backend
            .send(MessageToBackend::SignInRequest {
                email: email.into(),
                password: password.into(),
            })
            .await
            .expect("failed to request sign-in");
    }

    pub async fn sign_out(&self) {
        self.to_backend
            .send(MessageToBackend::SignOutRequest)
            .await
            .expect("failed to request sign-out");
    }

    pub async fn request_dashboard(&self) {
        self.to_backend
            .send(MessageToBackend::DashboardRequest)
            .await
            .expect("failed to request the dashboard");
    }

    pub async fn send_prompt(&self, prompt: impl Into<String>) {
        self.to_backend
            .send(MessageToBackend::AssistantPromptRequest {
                prompt: prompt.into(),
            })
            .await
            .expect("failed to send the assistant prompt");
    }
}

/// Runs the shell event loop until the backend closes its side of the
/// bridge.
///
/// Backend events mutate the [`Shell`]; notification queue changes are
/// rendered through the log as they happen.
pub fn run(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let bridge = BackendBridge { to_backend: tx };
        bridge.request_config().await;

        let mut shell = Shell::new();
        let mut toasts = shell.notifications.subscribe();

        loop {
            tokio::select! {
                message = rx.recv() => {
                    let Some(message) = message else { break };
                    shell.apply(message);
                }
                changed = toasts.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    for line in toasts
                        .borrow_and_update()
                        .iter()
                        .map(formatting::format_notification)
                    {
                        log::info!("{line}");
                    }
                }
            }
        }

        log::info!("Backend bridge closed; shutting the shell down");
    });

    Ok(())
}
