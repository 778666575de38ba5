//! The shell's state container and backend event application.
//!
//! [`Shell`] owns everything the presentation layer reads: the session, the
//! router, the notification center, and the last seen config, dashboard, and
//! assistant transcript. All mutation funnels through [`Shell::apply`] (for
//! backend events) and the navigation/dismissal methods, running to
//! completion on the shell's single-threaded event loop.

use classdeck_access::SessionState;
use classdeck_bridge::MessageFromBackend;
use classdeck_bridge::assistant::AssistantUsage;
use classdeck_bridge::config::Config;
use classdeck_bridge::dashboard::DashboardSummary;
use classdeck_bridge::session::SessionUpdate;
use classdeck_notify::center::NotificationCenter;
use classdeck_notify::{NotificationDraft, NotificationId};

use crate::router::{RouteId, Router};

/// Assistant panel state: the reply being streamed and the finished ones.
#[derive(Debug, Default)]
pub struct AssistantPanel {
    /// Completed replies, oldest first.
    pub transcript: Vec<String>,
    /// Chunks of the reply currently streaming in.
    pub pending_reply: String,
    /// Last reported quota usage.
    pub usage: Option<AssistantUsage>,
}

/// Client-side application state, fed by backend events.
pub struct Shell {
    pub session: SessionState,
    pub router: Router,
    pub notifications: NotificationCenter,
    pub config: Option<Config>,
    pub dashboard: Option<DashboardSummary>,
    pub assistant: AssistantPanel,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            session: SessionState::Resolving,
            router: Router::new(),
            notifications: NotificationCenter::new(),
            config: None,
            dashboard: None,
            assistant: AssistantPanel::default(),
        }
    }

    /// Applies a backend event to the shell state.
    ///
    /// Must run inside a tokio runtime: notification events schedule their
    /// own removal timers.
    pub fn apply(&mut self, message: MessageFromBackend) {
        match message {
            MessageFromBackend::NotificationMessage(notification) => {
                let id = self.notifications.add(NotificationDraft::from(notification));
                log::debug!("Queued notification {id}");
            }
            MessageFromBackend::ConfigurationResponse(config) => {
                self.config = Some(config);
            }
            MessageFromBackend::SessionUpdate(update) => {
                self.session = match update {
                    SessionUpdate::SignedOut => SessionState::SignedOut,
                    SessionUpdate::SignedIn(identity) => SessionState::SignedIn(identity),
                };
                let route = self.router.refresh(&self.session);
                log::info!("Session settled; now on {route:?}");
            }
            MessageFromBackend::DashboardResponse(summary) => {
                self.dashboard = Some(summary);
            }
            MessageFromBackend::AssistantReplyChunk { text } => {
                self.assistant.pending_reply.push_str(&text);
            }
            MessageFromBackend::AssistantReplyComplete { usage } => {
                let reply = std::mem::take(&mut self.assistant.pending_reply);
                if !reply.is_empty() {
                    self.assistant.transcript.push(reply);
                }
                self.assistant.usage = Some(usage);
            }
            MessageFromBackend::AssistantReplyAborted => {
                // The stream broke mid-reply; the fragment must not leak
                // into the next transcript entry.
                self.assistant.pending_reply.clear();
            }
        }
    }

    /// Navigates to `target`, subject to the route guard.
    pub fn navigate(&mut self, target: RouteId) -> RouteId {
        self.router.navigate(target, &self.session)
    }

    /// Dismisses a notification on behalf of the presentation layer.
    pub fn dismiss(&mut self, id: NotificationId) {
        self.notifications.remove(id);
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
