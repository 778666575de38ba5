//! Communication bridge between the client shell and the backend.
//!
//! This crate defines the types and protocols used to connect the
//! application shell with an asynchronous backend responsible for session
//! management, dashboard data, the AI assistant, and configuration.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The shell sends commands (e.g., sign in, request the dashboard,
//!   submit an assistant prompt).
//! - The backend pushes events (e.g., session updates, notification
//!   requests, streamed assistant reply chunks).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod notification;
pub mod session;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the shell of state updates.
///
/// These are typically sent in response to shell requests or to push
/// asynchronous progress/events (e.g., streamed assistant output,
/// notification requests).
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Request to surface a user-facing notification in the shell.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the shell.
    ConfigurationResponse(config::Config),
    /// The backend's current view of the session. Sent once at startup when
    /// session restoration settles, and again after every sign-in/out.
    SessionUpdate(session::SessionUpdate),
    /// Dashboard summary for the signed-in identity.
    DashboardResponse(dashboard::DashboardSummary),
    /// A streamed fragment of the assistant's reply to the active prompt.
    AssistantReplyChunk {
        /// Text fragment, in arrival order.
        text: String,
    },
    /// The assistant finished replying to the active prompt.
    AssistantReplyComplete {
        /// Quota usage after the reply was counted.
        usage: assistant::AssistantUsage,
    },
    /// The active reply was cut off by a stream error. Any partial text
    /// already pushed must be discarded; the prompt still counts against
    /// the quota.
    AssistantReplyAborted,
}

/// Commands issued by the shell to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Request to authenticate with the learning platform.
    SignInRequest { email: String, password: String },
    /// Request to end the current session.
    SignOutRequest,
    /// Request for the signed-in identity's dashboard summary.
    DashboardRequest,
    /// Submit a prompt to the AI assistant.
    AssistantPromptRequest { prompt: String },
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// the shell and the backend.
pub struct BridgeChannels {
    /// Receiver used by the shell to get messages from the backend.
    pub shell_rx: Receiver<MessageFromBackend>,
    /// Sender used by the shell to send commands to the backend.
    pub shell_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the shell.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the shell.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_shell_tx, to_shell_rx) = mpsc::channel(buffer);
        Self {
            shell_tx: to_backend_tx,
            shell_rx: to_shell_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_shell_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
