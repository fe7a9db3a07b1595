//! Two-step session client for the planner agent backend
//!
//! One plan request is exactly two POSTs to the same session URL: create the
//! session with an empty body, then send the user message and read back the
//! event array. Both steps share one wall-clock deadline measured from the
//! start of the first; expiry cancels whichever request is in flight. There
//! are no automatic retries - retry is always user-triggered.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::events::ResponseEvent;
use crate::extract::extract_plan_text;
use crate::types::{GeneratedPlan, PlanInput};

/// Backend seam for the front ends
///
/// The TUI and the one-shot CLI only ever see this trait, which lets tests
/// drive them with a canned backend.
#[async_trait]
pub trait PlanBackend: Send + Sync {
    /// Run one complete plan request for the given input
    async fn generate_plan(&self, input: &PlanInput) -> Result<GeneratedPlan, ClientError>;
}

/// Connection settings for one backend
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Base URL, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Fixed application name in the session path
    pub app_name: String,
    /// Fixed user identifier in the session path
    pub user_id: String,
    /// Shared deadline for the whole two-step exchange
    pub timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            app_name: "weekend_planner".to_string(),
            user_id: "web_user".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the session protocol
pub struct AgentClient {
    http: Client,
    base_url: String,
    app_name: String,
    user_id: String,
    timeout: Duration,
}

impl AgentClient {
    /// Create a client from connection settings
    ///
    /// No per-request timeout is set on the underlying HTTP client; the
    /// exchange-wide deadline in [`PlanBackend::generate_plan`] is the only
    /// clock.
    pub fn new(settings: BackendSettings) -> Result<Self, ClientError> {
        debug!(base_url = %settings.base_url, "AgentClient::new: called");
        let http = Client::builder().build().map_err(ClientError::from_transport)?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            app_name: settings.app_name,
            user_id: settings.user_id,
            timeout: settings.timeout,
        })
    }

    /// Session URL for one request; both steps post to the same path
    fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/apps/{}/users/{}/sessions/{}",
            self.base_url, self.app_name, self.user_id, session_id
        )
    }

    /// Envelope for the message-send step
    fn message_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "new_message": {
                "role": "user",
                "parts": [{ "text": prompt }],
            }
        })
    }

    /// Step 1: create the session. Any 2xx is success; the body is ignored.
    async fn create_session(&self, url: &str) -> Result<(), ClientError> {
        debug!(%url, "create_session: called");
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            warn!(status, "create_session: backend rejected session");
            return Err(ClientError::from_status(status, body));
        }

        debug!("create_session: session created");
        Ok(())
    }

    /// Step 2: send the prompt and parse the event array
    async fn send_message(&self, url: &str, prompt: &str) -> Result<GeneratedPlan, ClientError> {
        debug!(%url, prompt_len = prompt.len(), "send_message: called");
        let response = self
            .http
            .post(url)
            .json(&Self::message_body(prompt))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ClientError::from_transport)?;

        if !(200..300).contains(&status) {
            warn!(status, "send_message: backend returned error status");
            return Err(ClientError::from_status(status, body));
        }

        let raw: serde_json::Value = serde_json::from_str(&body).map_err(ClientError::Parse)?;
        let events: Vec<ResponseEvent> = serde_json::from_value(raw.clone()).map_err(ClientError::Parse)?;
        let plan_text = extract_plan_text(&events);

        debug!(
            events = events.len(),
            has_text = plan_text.is_some(),
            "send_message: response parsed"
        );
        Ok(GeneratedPlan {
            plan_text,
            events,
            raw,
        })
    }

    /// Both steps in order, against a fresh session
    async fn run_exchange(&self, input: &PlanInput) -> Result<GeneratedPlan, ClientError> {
        let session_id = Uuid::new_v4().to_string();
        let url = self.session_url(&session_id);

        self.create_session(&url).await?;
        self.send_message(&url, &input.prompt()).await
    }
}

#[async_trait]
impl PlanBackend for AgentClient {
    async fn generate_plan(&self, input: &PlanInput) -> Result<GeneratedPlan, ClientError> {
        debug!(location = %input.location, ages = input.kids_ages.len(), "generate_plan: called");

        // One deadline over the whole exchange; it is not reset between the
        // two steps. Dropping the future cancels the in-flight request.
        match tokio::time::timeout(self.timeout, self.run_exchange(input)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(timeout = ?self.timeout, "generate_plan: deadline elapsed, request cancelled");
                Err(ClientError::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AgentClient {
        AgentClient::new(BackendSettings::default()).expect("default client should build")
    }

    #[test]
    fn test_session_url_shape() {
        let url = client().session_url("abc-123");
        assert_eq!(
            url,
            "http://localhost:8000/apps/weekend_planner/users/web_user/sessions/abc-123"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AgentClient::new(BackendSettings {
            base_url: "http://planner.example:9000/".to_string(),
            ..Default::default()
        })
        .expect("client should build");

        assert_eq!(
            client.session_url("s1"),
            "http://planner.example:9000/apps/weekend_planner/users/web_user/sessions/s1"
        );
    }

    #[test]
    fn test_message_body_envelope() {
        let body = AgentClient::message_body("Plan a weekend trip to 94105.");
        assert_eq!(body["new_message"]["role"], "user");
        assert_eq!(body["new_message"]["parts"][0]["text"], "Plan a weekend trip to 94105.");
        assert_eq!(
            body["new_message"]["parts"].as_array().map(|p| p.len()),
            Some(1)
        );
    }

    #[test]
    fn test_default_settings_match_backend_contract() {
        let settings = BackendSettings::default();
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
