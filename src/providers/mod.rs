/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for LLM providers:
 * - OpenAI: chat-completions API integration
 * - Anthropic: messages API integration
 * - Mock: deterministic provider for tests
 */

use std::fmt::Debug;

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably in the translation
/// service. It is object-safe: the service holds a `Box<dyn Provider>` chosen
/// at startup.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short name used in logs and the run summary
    fn name(&self) -> &str;

    /// Complete a system+user prompt pair and return the raw text response
    ///
    /// # Arguments
    /// * `system` - The system prompt establishing the brand voice
    /// * `user` - The user prompt carrying the content to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The model's text or an error
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider with a minimal request
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider is reachable
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod anthropic;
pub mod mock;
pub mod openai;

pub use anthropic::Anthropic;
pub use mock::MockProvider;
pub use openai::OpenAI;
