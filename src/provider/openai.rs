//! OpenAI-compatible chat completions provider.
//!
//! Works against OpenAI and OpenRouter, which share the `/chat/completions`
//! wire format. Response structs keep fields the client does not read yet,
//! marked `#[allow(dead_code)]`, so the API contract stays visible.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    Provider,
    constants::{BASE_URL_ENV_VAR, MODEL_ENV_VAR},
};
use crate::core::{
    ApiKey, ChatRole, Completion, CompletionProvider, CompletionRequest, Credential, HttpClient,
    InspectorConfig, LanguageModelUsage, LlmError, Message, ResponseFormat, ResponseMetadata,
};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub provider: Provider,
    pub api_key: Credential,
    pub base_url: String,
    pub model: String,
    pub user_agent: Option<String>,
    pub http_referer: Option<String>,
    pub x_title: Option<String>,
    pub inspector: Option<InspectorConfig>,
}

impl OpenAiConfig {
    pub fn new(provider: Provider, api_key: Credential) -> Self {
        Self {
            provider,
            api_key,
            base_url: provider.default_base_url().to_string(),
            model: provider.default_model().to_string(),
            user_agent: None,
            http_referer: None,
            x_title: None,
            inspector: None,
        }
    }

    /// Resolve the key and apply `NOTESAI_MODEL` / `NOTESAI_BASE_URL` when set.
    pub fn from_env(provider: Provider, api_key: &ApiKey) -> Result<Self, LlmError> {
        let mut config = Self::new(provider, api_key.resolve(provider)?);

        if let Some(model) = non_empty_env(MODEL_ENV_VAR) {
            config.model = model;
        }
        if let Some(base_url) = non_empty_env(BASE_URL_ENV_VAR) {
            config.base_url = base_url;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_http_referer(mut self, http_referer: impl Into<String>) -> Self {
        self.http_referer = Some(http_referer.into());
        self
    }

    pub fn with_x_title(mut self, x_title: impl Into<String>) -> Self {
        self.x_title = Some(x_title.into());
        self
    }

    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector = Some(inspector);
        self
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.provider.chat_completions_endpoint()
        )
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose()),
        )];

        if let Some(referer) = &self.http_referer {
            headers.push(("HTTP-Referer".to_string(), referer.clone()));
        }

        if let Some(title) = &self.x_title {
            headers.push(("X-Title".to_string(), title.clone()));
        }

        headers
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub struct OpenAiChatClient {
    config: OpenAiConfig,
    http: HttpClient,
}

impl OpenAiChatClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.user_agent.as_deref(), config.inspector.clone())?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionProvider for OpenAiChatClient {
    #[tracing::instrument(
        name = "chat_completion",
        skip(self, request),
        fields(
            provider = %self.config.provider,
            model = %self.config.model,
            messages = request.messages.len(),
            json = request.response_format.is_json()
        ),
        err
    )]
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LlmError> {
        let body = ChatCompletionRequest::from_core(&self.config.model, request);
        let response: ChatCompletionResponse = self
            .http
            .post_json(&self.config.url(), &self.config.headers(), &body)
            .await?;

        Ok(response.into_completion(self.config.provider))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<WireResponseFormat>,
}

impl ChatCompletionRequest {
    fn from_core(model: &str, request: CompletionRequest) -> Self {
        Self {
            model: model.to_string(),
            messages: request
                .messages
                .into_iter()
                .map(ChatCompletionMessage::from)
                .collect(),
            temperature: request.generation.temperature,
            max_tokens: request.generation.max_tokens,
            response_format: WireResponseFormat::from_core(request.response_format),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage {
    role: ChatRole,
    content: String,
}

impl From<Message> for ChatCompletionMessage {
    fn from(message: Message) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireResponseFormat {
    JsonObject,
    JsonSchema { json_schema: WireJsonSchema },
}

#[derive(Debug, Serialize)]
struct WireJsonSchema {
    name: String,
    schema: serde_json::Value,
    strict: bool,
}

impl WireResponseFormat {
    fn from_core(format: ResponseFormat) -> Option<Self> {
        match format {
            ResponseFormat::Text => None,
            ResponseFormat::JsonObject => Some(Self::JsonObject),
            ResponseFormat::JsonSchema { name, schema } => Some(Self::JsonSchema {
                json_schema: WireJsonSchema {
                    name,
                    schema,
                    strict: false,
                },
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    id: String,
    #[allow(dead_code)]
    #[serde(default)]
    object: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    created: Option<u64>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[allow(dead_code)]
    #[serde(default)]
    index: u32,
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[allow(dead_code)]
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl ChatCompletionResponse {
    fn into_completion(self, provider: Provider) -> Completion {
        let first = self.choices.into_iter().next();
        let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
        let text = first
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        Completion {
            text,
            usage: self.usage.map(|usage| LanguageModelUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
            metadata: ResponseMetadata {
                provider,
                model: self.model,
                id: self.id,
                finish_reason,
            },
        }
    }
}
