use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::provider::LLMProvider;
use crate::providers::error_from_response;
use crate::{ApiKey, Error, Prompt};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI provider implementation.
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider.
    pub fn new() -> Result<Self, Error> {
        Self::new_with_base_url(DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }

    /// Create a new OpenAI provider with custom base URL and model.
    pub fn new_with_base_url(base_url: String, model: String) -> Result<Self, Error> {
        Self::with_timeout(base_url, model, Duration::from_secs(60))
    }

    /// Create a new OpenAI provider with an explicit client timeout.
    pub fn with_timeout(base_url: String, model: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            model,
        })
    }

    /// Convert a prompt to the Chat Completions format.
    fn convert_request(&self, prompt: &Prompt) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.as_str().to_string()),
            }],
        }
    }

    /// Pull the generated text out of a completion.
    fn extract_text(response: ChatCompletionResponse) -> Result<String, Error> {
        if let Some(usage) = &response.usage {
            tracing::debug!(
                provider = "OpenAI",
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion received"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider("OpenAI", "response contained no choices"))?;

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
            _ => Err(Error::provider(
                "OpenAI",
                format!(
                    "response contained no text (finish reason: {})",
                    choice.finish_reason.as_deref().unwrap_or("unknown")
                ),
            )),
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIProvider {
    async fn generate_text(&self, prompt: &Prompt, credential: &ApiKey) -> Result<String, Error> {
        let request = self.convert_request(prompt);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url.trim_end_matches('/')))
            .header(AUTHORIZATION, credential.header_value(Some("Bearer"))?)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(error_from_response("OpenAI", &self.model, status, &error_text));
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
        Self::extract_text(completion)
    }

    fn validate_credential(&self, credential: &ApiKey) -> Result<(), Error> {
        credential.header_value(Some("Bearer")).map(|_| ())
    }
}
