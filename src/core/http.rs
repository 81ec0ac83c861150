//! Shared HTTP client for all providers.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::{LlmError, excerpt};

const OPERATION: &str = "chat_completion";

pub type Inspector = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Hooks that observe raw request and response bodies.
#[derive(Clone, Default)]
pub struct InspectorConfig {
    pub request_inspector: Option<Inspector>,
    pub response_inspector: Option<Inspector>,
}

impl InspectorConfig {
    pub fn on_request(
        mut self,
        inspector: impl Fn(&serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        self.request_inspector = Some(Arc::new(inspector));
        self
    }

    pub fn on_response(
        mut self,
        inspector: impl Fn(&serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        self.response_inspector = Some(Arc::new(inspector));
        self
    }
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("request_inspector", &self.request_inspector.is_some())
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

/// Thin wrapper over `reqwest::Client`: one attempt per call, no timeout.
pub struct HttpClient {
    client: reqwest::Client,
    inspector_config: Option<InspectorConfig>,
}

impl HttpClient {
    pub fn new(
        user_agent: Option<&str>,
        inspector_config: Option<InspectorConfig>,
    ) -> Result<Self, LlmError> {
        let default_ua = format!("notesai/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .user_agent(ua)
            .build()
            .map_err(|e| LlmError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            inspector_config,
        })
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// Any non-success status is fatal; the error carries the status code and
    /// an excerpt of the body.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let body_value = serde_json::to_value(body).map_err(|e| LlmError::UpstreamRequest {
            operation: OPERATION,
            message: format!("Failed to serialize request: {e}"),
            status_code: None,
            source: Some(Box::new(e)),
        })?;

        if let Some(inspector) = self
            .inspector_config
            .as_ref()
            .and_then(|config| config.request_inspector.as_ref())
        {
            inspector(&body_value);
        }

        let mut req_builder = self.client.post(url).json(&body_value);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            LlmError::UpstreamRequest {
                operation: OPERATION,
                message: format!("Request to {url} failed: {e}"),
                status_code: None,
                source: Some(Box::new(e)),
            }
        })?;

        let status = res.status();
        let response_text = res.text().await.map_err(|e| LlmError::UpstreamRequest {
            operation: OPERATION,
            message: format!("Failed to read response body: {e}"),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        let response_value = serde_json::from_str::<serde_json::Value>(&response_text);

        if let Some(inspector) = self
            .inspector_config
            .as_ref()
            .and_then(|config| config.response_inspector.as_ref())
        {
            let value = match &response_value {
                Ok(value) => value.clone(),
                Err(_) => serde_json::json!({
                    "error": response_text,
                    "status_code": status.as_u16()
                }),
            };
            inspector(&value);
        }

        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            return Err(LlmError::UpstreamRequest {
                operation: OPERATION,
                message: format!("API returned {status}: {}", excerpt(&response_text)),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        debug!(status = %status, "HTTP request successful");

        let response_value = response_value.map_err(|e| LlmError::UpstreamRequest {
            operation: OPERATION,
            message: format!(
                "Failed to parse response as JSON: {e} (body: {})",
                excerpt(&response_text)
            ),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        serde_json::from_value(response_value).map_err(|e| LlmError::UpstreamRequest {
            operation: OPERATION,
            message: format!("Failed to parse API response: {e}"),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })
    }
}
