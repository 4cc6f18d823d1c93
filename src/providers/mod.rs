//! Provider implementations for different LLM services.

pub mod gemini;
pub mod openai;

// Re-export commonly used provider types
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::Error;

/// Error body shared by the OpenAI and Gemini APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetails {
    message: String,
}

/// Map a non-success HTTP response to an [`Error`].
pub(crate) fn error_from_response(
    provider: &str,
    model: &str,
    status: StatusCode,
    body: &str,
) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::auth(format!("{provider} rejected the API key: {message}"))
        }
        StatusCode::NOT_FOUND => Error::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimit,
        _ => Error::provider(provider, format!("API error ({status}): {message}")),
    }
}
