//! Typed client for the learning platform's HTTP API.
//!
//! The platform speaks camelCase JSON; request/response DTOs live next to
//! the client. Services translate [`ApiError`]s into error notifications for
//! the shell, so nothing in this module surfaces errors to the user directly.

use std::time::Duration;

use classdeck_bridge::config::ApiConfig;
use classdeck_bridge::dashboard::DashboardSummary;
use classdeck_bridge::session::Identity;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Errors produced by platform API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed: connection, DNS, timeout, or a body
    /// decoding failure inside reqwest.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The platform rejected the credentials or the session token.
    #[error("not authorized")]
    Unauthorized,
    /// Any other non-success status.
    #[error("the platform answered with status {0}")]
    Status(StatusCode),
}

/// Successful sign-in payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account.
    pub user: Identity,
}

#[derive(Debug, Serialize)]
struct SignInRequestBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AssistantPromptBody<'a> {
    prompt: &'a str,
}

/// Thin wrapper over a pooled [`reqwest::Client`] bound to the configured
/// base URL. Cheap to clone; clones share the connection pool.
///
/// The configured timeout is applied per request on the non-streaming
/// endpoints only: reqwest's total-request timeout keeps running while the
/// body is read, which would cut off an assistant reply that streams for
/// longer than the limit. The streamed endpoint gets the connect timeout
/// and nothing else.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    request_timeout: Duration,
}

impl ApiClient {
    /// Builds a client from the API section of the configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            request_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchanges credentials for a session token and identity.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/auth/sign-in"))
            .timeout(self.request_timeout)
            .json(&SignInRequestBody { email, password })
            .send()
            .await?;
        Ok(ensure_success(response)?.json().await?)
    }

    /// Validates a stored token and returns the identity it belongs to.
    pub async fn current_session(&self, token: &str) -> Result<Identity, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/auth/session"))
            .timeout(self.request_timeout)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(ensure_success(response)?.json().await?)
    }

    /// Fetches the role-scoped dashboard summary for the token's account.
    pub async fn dashboard(&self, token: &str) -> Result<DashboardSummary, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/dashboard"))
            .timeout(self.request_timeout)
            .bearer_auth(token)
            .send()
            .await?;
        Ok(ensure_success(response)?.json().await?)
    }

    /// Submits an assistant prompt and returns the response with its body
    /// unread, so the caller can stream the reply chunk by chunk.
    ///
    /// Deliberately carries no per-request timeout: the reply body streams
    /// for as long as the assistant keeps talking.
    pub async fn assistant_prompt(
        &self,
        token: &str,
        prompt: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/assistant/messages"))
            .bearer_auth(token)
            .json(&AssistantPromptBody { prompt })
            .send()
            .await?;
        ensure_success(response)
    }
}

/// Maps non-success statuses to [`ApiError`], keeping 401/403 distinct so
/// services can react to expired sessions specifically.
fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
        status => Err(ApiError::Status(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_normalize_a_trailing_slash_in_the_base_url() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "https://api.example.edu/".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.endpoint("/dashboard"), "https://api.example.edu/dashboard");
    }

    #[test]
    fn request_timeout_is_kept_per_request_not_on_the_shared_client() {
        // The shared client only gets a connect timeout; the configured
        // request timeout is stored for the non-streaming endpoints so a
        // long-lived streamed reply is never cut off by the wall clock.
        let client = ApiClient::new(&ApiConfig {
            base_url: "https://api.example.edu".to_string(),
            request_timeout_secs: 30,
        })
        .unwrap();
        assert_eq!(client.request_timeout, Duration::from_secs(30));
    }
}
