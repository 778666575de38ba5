use serde::{Deserialize, Serialize};

/// Configuration for reaching the learning platform's HTTP API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the platform API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.classdeck.dev".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Configuration for the AI assistant panel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Maximum number of assistant messages per calendar day.
    pub daily_message_limit: u32,
    /// Percentage of the daily limit at which a warning notification is
    /// raised. Values of 100 or above disable the warning.
    pub warn_threshold_percent: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            daily_message_limit: 50,
            warn_threshold_percent: 80,
        }
    }
}

/// Configuration for restoring a previous session across runs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Bearer token from the most recent sign-in, if any. Presence of a
    /// token makes the backend attempt a session restore at startup.
    pub token: Option<String>,
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Configuration for the platform API connection.
    pub api: ApiConfig,
    /// Configuration for the AI assistant panel.
    pub assistant: AssistantConfig,
    /// Persisted session state.
    pub session: SessionConfig,
}
