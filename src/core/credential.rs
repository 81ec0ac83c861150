//! API credentials and where to find them.

use std::fmt;

use super::error::LlmError;
use crate::provider::Provider;

const VISIBLE_PREFIX: usize = 8;
const VISIBLE_SUFFIX: usize = 4;

/// Where the API key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// The provider's default environment variable, e.g. `OPENAI_API_KEY`.
    Default,
    /// A custom environment variable.
    Env(String),
    /// A key supplied directly.
    Custom(String),
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKey::Default => write!(f, "ApiKey::Default"),
            ApiKey::Env(var) => write!(f, "ApiKey::Env({var:?})"),
            ApiKey::Custom(key) => write!(f, "ApiKey::Custom({})", mask(key)),
        }
    }
}

impl ApiKey {
    /// Resolve the key, reading the environment if needed.
    pub fn resolve(&self, provider: Provider) -> Result<Credential, LlmError> {
        match self {
            ApiKey::Default => Credential::from_env(provider.default_api_key_env_var()),
            ApiKey::Env(var) => Credential::from_env(var),
            ApiKey::Custom(key) => Credential::new(key.clone()),
        }
    }
}

/// An API secret. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self, LlmError> {
        let secret = secret.into();
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(LlmError::configuration(
                "API key is empty. Please set it in your configuration.",
            ));
        }
        Ok(Self(secret.to_string()))
    }

    pub fn from_env(var: &str) -> Result<Self, LlmError> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value.trim().to_string())),
            Ok(_) => Err(LlmError::configuration(format!(
                "{var} is empty. Please set it in your configuration (environment or .env file)."
            ))),
            Err(_) => Err(LlmError::configuration(format!(
                "{var} is not set. Please set it in your configuration (environment or .env file)."
            ))),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Leading 8 and trailing 4 characters, the rest elided.
    pub fn masked(&self) -> String {
        mask(&self.0)
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= VISIBLE_PREFIX + VISIBLE_SUFFIX {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..VISIBLE_PREFIX].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("{head}...{tail}")
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.masked())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
