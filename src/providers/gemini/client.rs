use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use super::types::*;
use crate::provider::LLMProvider;
use crate::providers::error_from_response;
use crate::{ApiKey, Error, Prompt};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Google Gemini provider using the Generative Language API with an API key.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new() -> Result<Self, Error> {
        Self::new_with_base_url(DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }

    /// Create a new Gemini provider with custom base URL and model (for testing).
    pub fn new_with_base_url(base_url: String, model: String) -> Result<Self, Error> {
        Self::with_timeout(base_url, model, Duration::from_secs(60))
    }

    /// Create a new Gemini provider with an explicit client timeout.
    pub fn with_timeout(base_url: String, model: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            model,
        })
    }

    /// Convert a prompt to the Gemini format.
    fn convert_request(&self, prompt: &Prompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.as_str().to_string()),
                }],
            }],
        }
    }

    /// Get the API endpoint for the configured model.
    fn get_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: GeminiResponse) -> Result<String, Error> {
        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(
                provider = "Gemini",
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                completion_tokens = usage.candidates_token_count.unwrap_or(0),
                "completion received"
            );
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!("prompt blocked: {reason}"))
                .unwrap_or_else(|| "response contained no candidates".to_string());
            return Err(Error::provider("Gemini", reason));
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::provider(
                "Gemini",
                format!(
                    "response contained no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            ));
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait::async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate_text(&self, prompt: &Prompt, credential: &ApiKey) -> Result<String, Error> {
        let request = self.convert_request(prompt);

        let response = self
            .client
            .post(self.get_endpoint())
            .header("x-goog-api-key", credential.header_value(None)?)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(error_from_response("Gemini", &self.model, status, &error_text));
        }

        let body = response.text().await?;
        let gemini_response: GeminiResponse = serde_json::from_str(&body)?;
        Self::extract_text(gemini_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let provider = GeminiProvider::new_with_base_url(
            "http://localhost:1234/".to_string(),
            "gemini-pro".to_string(),
        )
        .unwrap();
        assert_eq!(
            provider.get_endpoint(),
            "http://localhost:1234/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_request_conversion() {
        let provider = GeminiProvider::new().unwrap();
        let request = provider.convert_request(&Prompt::new("Hello"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
            })
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Join "},{"text":"us! "}]},"finishReason":"STOP"}],"usageMetadata":{"promptTokenCount":10,"candidatesTokenCount":3,"totalTokenCount":13}}"#,
        )
        .unwrap();
        assert_eq!(GeminiProvider::extract_text(response).unwrap(), "Join us!");
    }

    #[test]
    fn test_blocked_prompt() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = GeminiProvider::extract_text(response).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Provider error: Gemini - prompt blocked: SAFETY"
        );
    }

    #[test]
    fn test_candidate_without_content() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        let err = GeminiProvider::extract_text(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}
