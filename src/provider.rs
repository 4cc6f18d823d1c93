use crate::{ApiKey, Error, Prompt};

/// A remote service that turns a prompt into text.
///
/// Providers are shared across requests; the credential is supplied per call
/// and never stored.
#[async_trait::async_trait]
pub trait LLMProvider: Send + Sync + 'static {
    /// Generate text for a single-turn prompt.
    async fn generate_text(&self, prompt: &Prompt, credential: &ApiKey) -> Result<String, Error>;

    /// Check a credential before any generation is attempted.
    fn validate_credential(&self, credential: &ApiKey) -> Result<(), Error> {
        credential.header_value(None).map(|_| ())
    }
}
