pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
}

pub mod openrouter {
    pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
    pub const API_BASE: &str = "https://openrouter.ai/api/v1";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
}

/// Optional overrides read when the provider handle is first built.
pub const MODEL_ENV_VAR: &str = "NOTESAI_MODEL";
pub const BASE_URL_ENV_VAR: &str = "NOTESAI_BASE_URL";
