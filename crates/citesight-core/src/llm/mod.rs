mod error;
mod openai;
mod provider;

pub use error::LLMError;
pub use openai::OpenAIClient;
pub use provider::Provider;

use async_trait::async_trait;

/// Trait for completion services.
///
/// The rest of the crate only sees prompts going in and text coming out, so
/// any OpenAI-compatible backend (or a test double) can sit behind it.
///
/// # Supported Providers
///
/// - **OpenRouter** (default): hosted models, requires `OPENROUTER_API_KEY`
/// - **OpenAI**: requires `OPENAI_API_KEY`
/// - **Ollama**: local models, no credential
///
/// # Example
///
/// ```ignore
/// use citesight_core::llm::{OpenAIClient, LLM};
/// use citesight_core::Config;
///
/// let config = Config::load()?;
/// let llm = OpenAIClient::from_config(&config.llm)?;
///
/// let reply = llm.complete_json("Return {\"ok\": true}").await?;
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Complete a prompt and return the response.
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;

    /// Complete a prompt, asking the backend for a JSON object reply.
    ///
    /// Default implementation falls back to a plain completion; callers must
    /// still parse the reply defensively.
    async fn complete_json(&self, prompt: &str) -> Result<String, LLMError> {
        self.complete(prompt).await
    }
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl LLM for Box<dyn LLM> {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        (**self).complete(prompt).await
    }

    async fn complete_json(&self, prompt: &str) -> Result<String, LLMError> {
        (**self).complete_json(prompt).await
    }
}
