pub(crate) mod constants;
pub(crate) mod openai;

pub use constants::{BASE_URL_ENV_VAR, MODEL_ENV_VAR};
pub use openai::{OpenAiChatClient, OpenAiConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    OpenRouter,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "OpenAI"),
            Provider::OpenRouter => write!(f, "OpenRouter"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => constants::openai::API_KEY_ENV_VAR,
            Provider::OpenRouter => constants::openrouter::API_KEY_ENV_VAR,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => constants::openai::API_BASE,
            Provider::OpenRouter => constants::openrouter::API_BASE,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => constants::openai::DEFAULT_MODEL,
            Provider::OpenRouter => constants::openrouter::DEFAULT_MODEL,
        }
    }

    pub(crate) fn chat_completions_endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAI => constants::openai::CHAT_COMPLETIONS_ENDPOINT,
            Provider::OpenRouter => constants::openrouter::CHAT_COMPLETIONS_ENDPOINT,
        }
    }
}
