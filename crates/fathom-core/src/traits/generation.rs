use async_trait::async_trait;

use crate::errors::FathomResult;

/// Natural-language generation capability, used only by query expansion.
#[async_trait]
pub trait IGenerationProvider: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> FathomResult<String>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
