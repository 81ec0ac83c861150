//! Note search and question answering on top of a [`CompletionProvider`].

mod config;
pub mod prompts;
mod search;

use std::sync::Arc;

use tracing::{debug, info};

pub use config::{ClientConfig, OperationSettings};

use crate::core::{
    CompletionProvider, CompletionRequest, LazyProvider, LlmError, Message, ResponseFormat,
    SearchableItem, SemanticSearchOutcome,
};
use prompts::{
    NO_ANSWER, NO_CHAT_RESPONSE, NO_NOTES_REASONING, NO_REASONING, NO_SUMMARY, SYSTEM_PROMPT,
};

/// Number of results returned by a search when the caller has no preference.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Shared entry point for all operations.
///
/// Cloning is cheap and clones share the same provider handle. The handle is
/// built on the first operation that needs it.
#[derive(Clone)]
pub struct CompletionClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    provider: LazyProvider,
    settings: OperationSettings,
}

impl CompletionClient {
    /// OpenAI client configured from `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let settings = config.settings.clone();
        let provider = LazyProvider::new(move || {
            let client = config.build_provider()?;
            let provider_config = client.config();
            info!(
                provider = %provider_config.provider,
                model = %provider_config.model,
                base_url = %provider_config.base_url,
                api_key = %provider_config.api_key.masked(),
                "Initialized completion provider"
            );
            Ok(Arc::new(client) as Arc<dyn CompletionProvider>)
        });

        Self::from_parts(provider, settings)
    }

    /// Use an already constructed provider.
    pub fn with_provider(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::from_parts(LazyProvider::ready(provider), OperationSettings::default())
    }

    pub fn from_parts(provider: LazyProvider, settings: OperationSettings) -> Self {
        Self {
            inner: Arc::new(ClientInner { provider, settings }),
        }
    }

    /// The provider handle, built on first call.
    ///
    /// Fails with [`LlmError::Configuration`] while the credential is missing.
    /// A later call tries again; once built, the handle is reused and the
    /// credential is not checked again.
    pub async fn provider(&self) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        self.inner.provider.get().await
    }

    pub fn settings(&self) -> &OperationSettings {
        &self.inner.settings
    }

    /// Rank `notes` by relevance to `query`.
    ///
    /// Returns at most `limit` notes in the order the model ranked them.
    /// Indices the model invents are ignored. With no notes, returns
    /// immediately without contacting the provider.
    #[tracing::instrument(
        name = "semantic_search",
        skip(self, query, notes),
        fields(notes = notes.len()),
        err
    )]
    pub async fn semantic_search(
        &self,
        query: &str,
        notes: &[SearchableItem],
        limit: usize,
    ) -> Result<SemanticSearchOutcome, LlmError> {
        const OPERATION: &str = "semantic_search";

        require_non_empty("query", query)?;

        if notes.is_empty() {
            debug!("No notes to search");
            return Ok(SemanticSearchOutcome {
                results: Vec::new(),
                reasoning: NO_NOTES_REASONING.to_string(),
            });
        }

        let request = CompletionRequest {
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(prompts::search_prompt(query, notes, limit)),
            ],
            generation: self.inner.settings.search.clone(),
            response_format: search::response_format(),
        };

        let text = self.complete(OPERATION, request).await?.unwrap_or_default();
        let selection = search::parse_selection(OPERATION, &text)?;
        let results = search::resolve_indices(&selection.indices, notes, limit);

        debug!(
            requested = selection.indices.len(),
            returned = results.len(),
            "Resolved search results"
        );

        Ok(SemanticSearchOutcome {
            results,
            reasoning: selection
                .reasoning
                .unwrap_or_else(|| NO_REASONING.to_string()),
        })
    }

    #[tracing::instrument(name = "summarize", skip_all, fields(chars = content.len()), err)]
    pub async fn summarize(&self, content: &str) -> Result<String, LlmError> {
        const OPERATION: &str = "summarize";

        require_non_empty("content", content)?;

        let request = CompletionRequest {
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(prompts::summary_prompt(content)),
            ],
            generation: self.inner.settings.summarize.clone(),
            response_format: ResponseFormat::Text,
        };

        let text = self.complete(OPERATION, request).await?;
        Ok(text_or_placeholder(text, NO_SUMMARY))
    }

    /// Answer `question` from `context` only.
    #[tracing::instrument(name = "answer", skip_all, err)]
    pub async fn answer(&self, question: &str, context: &str) -> Result<String, LlmError> {
        const OPERATION: &str = "answer";

        require_non_empty("question", question)?;
        require_non_empty("context", context)?;

        let request = CompletionRequest {
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(prompts::answer_prompt(question, context)),
            ],
            generation: self.inner.settings.answer.clone(),
            response_format: ResponseFormat::Text,
        };

        let text = self.complete(OPERATION, request).await?;
        Ok(text_or_placeholder(text, NO_ANSWER))
    }

    /// Continue a conversation.
    ///
    /// The fixed system prompt always goes first; caller messages follow in
    /// their original order.
    #[tracing::instrument(name = "chat", skip_all, fields(messages = messages.len()), err)]
    pub async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        const OPERATION: &str = "chat";

        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(Message::system(SYSTEM_PROMPT));
        conversation.extend_from_slice(messages);

        let request = CompletionRequest {
            messages: conversation,
            generation: self.inner.settings.chat.clone(),
            response_format: ResponseFormat::Text,
        };

        let text = self.complete(OPERATION, request).await?;
        Ok(text_or_placeholder(text, NO_CHAT_RESPONSE))
    }

    async fn complete(
        &self,
        operation: &'static str,
        request: CompletionRequest,
    ) -> Result<Option<String>, LlmError> {
        let provider = self.provider().await?;
        let completion = provider
            .complete(request)
            .await
            .map_err(|e| e.within(operation))?;

        debug!(
            operation,
            model = %completion.metadata.model,
            finish_reason = completion.metadata.finish_reason.as_deref().unwrap_or("unknown"),
            total_tokens = completion.usage.as_ref().map(|u| u.total_tokens),
            "Received completion"
        );

        Ok(completion.text)
    }
}

fn require_non_empty(argument: &'static str, value: &str) -> Result<(), LlmError> {
    if value.trim().is_empty() {
        return Err(LlmError::invalid_argument(
            argument,
            "must be a non-empty string",
        ));
    }
    Ok(())
}

/// Trimmed model text, or `placeholder` when there is none.
fn text_or_placeholder(text: Option<String>, placeholder: &str) -> String {
    text.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
