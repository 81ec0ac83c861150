pub mod credential;
pub mod error;
pub mod http;
pub mod lazy;
pub mod traits;
pub mod types;

pub use credential::{ApiKey, Credential};
pub use error::LlmError;
pub use http::{HttpClient, InspectorConfig};
pub use lazy::LazyProvider;
pub use traits::CompletionProvider;
pub use types::{
    ChatRole, Completion, CompletionRequest, GenerationConfig, LanguageModelUsage, Message,
    ResponseFormat, ResponseMetadata, SearchResult, SearchableItem, SemanticSearchOutcome,
};
