use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Maximum number of characters of a remote payload carried inside an error.
pub const EXCERPT_LEN: usize = 200;

#[derive(Error, Debug)]
pub enum LlmError {
    /// Missing credential or a provider handle that could not be built.
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The caller passed input that is rejected before any network call.
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// The remote call itself failed.
    #[error("{operation} request failed: {message}")]
    UpstreamRequest {
        operation: &'static str,
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The remote call succeeded but its text has the wrong shape.
    #[error("{operation} returned an unusable response: {message} (excerpt: {excerpt})")]
    UpstreamResponse {
        operation: &'static str,
        message: String,
        excerpt: String,
    },
}

impl LlmError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        LlmError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        LlmError::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    pub(crate) fn upstream_response(
        operation: &'static str,
        message: impl Into<String>,
        payload: &str,
    ) -> Self {
        LlmError::UpstreamResponse {
            operation,
            message: message.into(),
            excerpt: excerpt(payload),
        }
    }

    /// Re-tag an upstream error with the operation that observed it.
    pub(crate) fn within(self, operation: &'static str) -> Self {
        match self {
            LlmError::UpstreamRequest {
                message,
                status_code,
                source,
                ..
            } => LlmError::UpstreamRequest {
                operation,
                message,
                status_code,
                source,
            },
            LlmError::UpstreamResponse {
                message, excerpt, ..
            } => LlmError::UpstreamResponse {
                operation,
                message,
                excerpt,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::UpstreamRequest { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

/// First [`EXCERPT_LEN`] characters of `text`, split on a char boundary.
pub(crate) fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}
