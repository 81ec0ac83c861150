//! Single-flight, lazily constructed provider handle.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::{error::LlmError, traits::CompletionProvider};

type ProviderInit = Box<dyn Fn() -> Result<Arc<dyn CompletionProvider>, LlmError> + Send + Sync>;

/// Holds at most one provider handle.
///
/// The initializer runs on first use. Concurrent first callers wait on the
/// same initialization and all receive the same handle. A failed
/// initialization leaves the slot empty, so the next call tries again. Once a
/// handle exists the initializer is never called again.
pub struct LazyProvider {
    cell: OnceCell<Arc<dyn CompletionProvider>>,
    init: ProviderInit,
}

impl LazyProvider {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn CompletionProvider>, LlmError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    /// A slot that already holds `provider`.
    pub fn ready(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(provider)),
            init: Box::new(|| {
                Err(LlmError::configuration(
                    "provider slot was created pre-initialized",
                ))
            }),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        let provider = self
            .cell
            .get_or_try_init(|| async { (self.init)() })
            .await?;
        Ok(Arc::clone(provider))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}
