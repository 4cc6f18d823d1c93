//! Turns event details into one post per platform.
//!
//! Failures never escape this module: every provider error becomes the text
//! shown for that platform, and the remaining platforms are still generated.

use crate::{ApiKey, EventDetails, LLMProvider, Platform, Prompt};

/// Prefix of the text shown when generation fails.
pub const ERROR_PREFIX: &str = "Error generating post: ";

/// The text generated (or the error reported) for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub platform: Platform,
    pub text: String,
    pub failed: bool,
}

/// Generate the post for a single platform.
pub async fn generate_post(
    provider: &dyn LLMProvider,
    credential: &ApiKey,
    platform: Platform,
    event: &EventDetails,
) -> GeneratedPost {
    let prompt = Prompt::for_post(platform, event);

    match provider.generate_text(&prompt, credential).await {
        Ok(text) => {
            let text = normalize_line_endings(&text);
            tracing::info!(%platform, chars = text.chars().count(), "post generated");
            GeneratedPost {
                platform,
                text,
                failed: false,
            }
        }
        Err(e) => {
            tracing::warn!(%platform, error = %e, "post generation failed");
            GeneratedPost {
                platform,
                text: normalize_line_endings(&format!("{ERROR_PREFIX}{e}")),
                failed: true,
            }
        }
    }
}

/// Browsers rewrite CR and CRLF to LF when parsing the page, so the text is
/// stored the way it will be displayed and copied.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Generate posts for every platform, one call after another, in display order.
pub async fn generate_all(
    provider: &dyn LLMProvider,
    credential: &ApiKey,
    event: &EventDetails,
) -> Vec<GeneratedPost> {
    let mut posts = Vec::with_capacity(Platform::ALL.len());
    for platform in Platform::ALL {
        posts.push(generate_post(provider, credential, platform, event).await);
    }
    posts
}
