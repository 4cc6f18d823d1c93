pub mod gemini;
pub mod openai;

use social_post_generator::LLMProvider;
use wiremock::MockServer;

/// Provider configuration for cross-provider testing
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: &'static str,
    pub model: &'static str,
}

/// Trait for provider-specific test setup
#[async_trait::async_trait]
pub trait ProviderTestSetup {
    /// Get the provider configuration
    fn get_config() -> ProviderConfig;

    /// Create the provider instance
    fn create_provider(base_url: &str) -> Box<dyn LLMProvider>;

    /// Mount a mock answering `prompt` sent with `api_key` with `reply`
    async fn mount_reply(mock_server: &MockServer, api_key: &str, prompt: &str, reply: &str);

    /// Mount a mock failing every generation with `status` and `body`
    async fn mount_failure(mock_server: &MockServer, status: u16, body: &str);

    /// Mount a mock answering with a well-formed response that carries no text
    async fn mount_empty(mock_server: &MockServer);
}
