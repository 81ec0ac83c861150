//! # notesai
//!
//! Search, summarize and question your notes with any OpenAI-compatible chat
//! model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notesai::{CompletionClient, DEFAULT_SEARCH_LIMIT, SearchableItem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads OPENAI_API_KEY the first time a request is made.
//!     let client = CompletionClient::from_env();
//!
//!     let notes = vec![
//!         SearchableItem::new("journal/monday.md", "Coffee with Ana, talked about the trip."),
//!         SearchableItem::new("work/roadmap.md", "Q3: ship the sync engine."),
//!     ];
//!
//!     let outcome = client
//!         .semantic_search("travel plans", &notes, DEFAULT_SEARCH_LIMIT)
//!         .await?;
//!     for note in &outcome.results {
//!         println!("{}", note.path);
//!     }
//!     println!("{}", outcome.reasoning);
//!     Ok(())
//! }
//! ```
//!
//! The provider handle is built lazily and exactly once per client. Tests and
//! embedders can inject their own [`CompletionProvider`] through
//! [`CompletionClient::with_provider`].

pub mod client;
pub mod core;
pub mod provider;

pub use client::{ClientConfig, CompletionClient, DEFAULT_SEARCH_LIMIT, OperationSettings};
pub use crate::core::{
    ApiKey, ChatRole, Completion, CompletionProvider, CompletionRequest, Credential,
    GenerationConfig, InspectorConfig, LanguageModelUsage, LazyProvider, LlmError, Message,
    ResponseFormat, ResponseMetadata, SearchResult, SearchableItem, SemanticSearchOutcome,
};
pub use provider::{OpenAiChatClient, OpenAiConfig, Provider};
