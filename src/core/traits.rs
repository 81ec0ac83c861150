use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{Completion, CompletionRequest},
};

/// A remote chat-completion backend.
///
/// Implementations own transport and wire format. Only the first candidate
/// of a response is surfaced through [`Completion::text`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LlmError>;
}
