//! Generates platform-specific social media posts for events.
//!
//! Event details typed into a web form are turned into one prompt per
//! platform (LinkedIn, Twitter, WhatsApp) and sent to OpenAI or Google Gemini
//! with a caller-supplied API key. Each result is rendered next to a
//! copy-to-clipboard button.

pub mod config;
pub mod error;
pub mod factory;
pub mod generator;
pub mod logging;
pub mod provider;
pub mod providers;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
pub mod web;

// Re-export core types for easy usage
pub use config::AppConfig;
pub use error::{Error, Result};
pub use factory::{ProviderConfig, ProviderFactory, ProviderRegistry, ProviderType};
pub use generator::{generate_all, generate_post, GeneratedPost};
pub use provider::LLMProvider;
pub use providers::*;
pub use types::*;
