use crate::{
    core::{ApiKey, GenerationConfig, InspectorConfig, LlmError},
    provider::{OpenAiChatClient, OpenAiConfig, Provider},
};

/// Generation parameters for each operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSettings {
    pub search: GenerationConfig,
    pub summarize: GenerationConfig,
    pub answer: GenerationConfig,
    pub chat: GenerationConfig,
}

impl Default for OperationSettings {
    fn default() -> Self {
        Self {
            search: GenerationConfig::new(0.3),
            summarize: GenerationConfig::new(0.5).with_max_tokens(150),
            answer: GenerationConfig::new(0.7).with_max_tokens(500),
            chat: GenerationConfig::new(0.7),
        }
    }
}

/// Everything needed to build the provider handle on first use.
///
/// The API key is resolved only when the handle is built, so a client can be
/// created before the environment is ready.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub provider: Provider,
    pub api_key: ApiKey,
    /// Overrides `NOTESAI_MODEL` and the provider default.
    pub model: Option<String>,
    /// Overrides `NOTESAI_BASE_URL` and the provider default.
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub inspector: Option<InspectorConfig>,
    pub settings: OperationSettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Provider::OpenAI)
    }
}

impl ClientConfig {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            api_key: ApiKey::Default,
            model: None,
            base_url: None,
            user_agent: None,
            inspector: None,
            settings: OperationSettings::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_api_key_env_var(mut self, var: impl Into<String>) -> Self {
        self.api_key = ApiKey::Env(var.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector = Some(inspector);
        self
    }

    pub fn with_settings(mut self, settings: OperationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub(crate) fn build_provider(&self) -> Result<OpenAiChatClient, LlmError> {
        let mut config = OpenAiConfig::from_env(self.provider, &self.api_key)?;

        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(inspector) = &self.inspector {
            config = config.with_inspector(inspector.clone());
        }

        OpenAiChatClient::new(config).map_err(|e| match e {
            LlmError::Configuration { message, source } => LlmError::Configuration {
                message: format!("Failed to create {} client: {message}", self.provider),
                source,
            },
            other => other,
        })
    }
}
