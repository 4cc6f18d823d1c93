use crate::providers::{gemini, openai};
use crate::{Error, GeminiProvider, LLMProvider, OpenAIProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
    #[serde(rename = "chatgpt")]
    OpenAI,
}

impl ProviderType {
    /// All providers, in the order they are offered to the user.
    pub const ALL: [ProviderType; 2] = [ProviderType::Gemini, ProviderType::OpenAI];

    /// Name shown in the provider choice.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "Gemini",
            ProviderType::OpenAI => "ChatGPT",
        }
    }

    /// Form value identifying this provider.
    pub fn form_value(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenAI => "chatgpt",
        }
    }

    /// Label for the credential input.
    pub fn key_label(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "Gemini API Key",
            ProviderType::OpenAI => "OpenAI API Key",
        }
    }

    /// Where a user can obtain a key.
    pub fn key_url(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "https://makersuite.google.com/app/apikey",
            ProviderType::OpenAI => "https://platform.openai.com/api-keys",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Configuration for creating a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Default configuration for OpenAI.
    pub fn openai() -> Self {
        Self {
            provider_type: ProviderType::OpenAI,
            base_url: openai::client::DEFAULT_BASE_URL.to_string(),
            model: openai::client::DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Default configuration for Gemini.
    pub fn gemini() -> Self {
        Self {
            provider_type: ProviderType::Gemini,
            base_url: gemini::client::DEFAULT_BASE_URL.to_string(),
            model: gemini::client::DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Point the provider at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different client timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Factory for creating LLM providers.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider from configuration.
    pub fn create(config: &ProviderConfig) -> Result<Box<dyn LLMProvider>, Error> {
        if config.model.trim().is_empty() {
            return Err(Error::config(format!(
                "Model name required for {} provider",
                config.provider_type
            )));
        }

        match config.provider_type {
            ProviderType::OpenAI => {
                let provider = OpenAIProvider::with_timeout(
                    config.base_url.clone(),
                    config.model.clone(),
                    config.timeout,
                )?;
                Ok(Box::new(provider))
            }
            ProviderType::Gemini => {
                let provider = GeminiProvider::with_timeout(
                    config.base_url.clone(),
                    config.model.clone(),
                    config.timeout,
                )?;
                Ok(Box::new(provider))
            }
        }
    }
}

/// One shared provider per provider type.
#[derive(Clone)]
pub struct ProviderRegistry {
    gemini: Arc<dyn LLMProvider>,
    openai: Arc<dyn LLMProvider>,
}

impl ProviderRegistry {
    /// Build a registry from explicit provider instances.
    pub fn new(gemini: Arc<dyn LLMProvider>, openai: Arc<dyn LLMProvider>) -> Self {
        Self { gemini, openai }
    }

    /// Build both providers through the factory.
    pub fn from_configs(gemini: &ProviderConfig, openai: &ProviderConfig) -> Result<Self, Error> {
        if gemini.provider_type != ProviderType::Gemini || openai.provider_type != ProviderType::OpenAI
        {
            return Err(Error::config("Provider configurations are swapped"));
        }

        Ok(Self {
            gemini: Arc::from(ProviderFactory::create(gemini)?),
            openai: Arc::from(ProviderFactory::create(openai)?),
        })
    }

    /// Get the provider for a type.
    pub fn get(&self, provider_type: ProviderType) -> Arc<dyn LLMProvider> {
        match provider_type {
            ProviderType::Gemini => Arc::clone(&self.gemini),
            ProviderType::OpenAI => Arc::clone(&self.openai),
        }
    }
}
