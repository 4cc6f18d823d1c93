//! Server configuration.
//!
//! Values start from defaults and are overridden by environment variables
//! (optionally loaded from a `.env` file). API keys are never part of the
//! configuration; they are typed into the form for each request.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::factory::ProviderConfig;
use crate::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Environment (development, production)
    pub environment: String,
    /// Upper bound for serving the form page and health check
    pub request_timeout_secs: u64,
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            log_level: "info".into(),
            environment: "development".into(),
            request_timeout_secs: 300,
            openai: ProviderConfig::openai(),
            gemini: ProviderConfig::gemini(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(Error::config(format!("Failed to read .env file: {e}")));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("BIND_ADDR") {
            config.bind_addr = parse_var("BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("ENVIRONMENT") {
            config.environment = v;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("PROVIDER_TIMEOUT_SECS") {
            let timeout = Duration::from_secs(parse_var("PROVIDER_TIMEOUT_SECS", &v)?);
            config.openai.timeout = timeout;
            config.gemini.timeout = timeout;
        }

        if let Some(v) = lookup("OPENAI_BASE_URL") {
            config.openai.base_url = v;
        }
        if let Some(v) = lookup("OPENAI_MODEL") {
            config.openai.model = v;
        }
        if let Some(v) = lookup("GEMINI_BASE_URL") {
            config.gemini.base_url = v;
        }
        if let Some(v) = lookup("GEMINI_MODEL") {
            config.gemini.model = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::config("REQUEST_TIMEOUT_SECS must be greater than zero"));
        }
        if self.openai.timeout.is_zero() || self.gemini.timeout.is_zero() {
            return Err(Error::config("PROVIDER_TIMEOUT_SECS must be greater than zero"));
        }
        for provider in [&self.openai, &self.gemini] {
            if !provider.base_url.starts_with("http://") && !provider.base_url.starts_with("https://") {
                return Err(Error::config(format!(
                    "{} base URL must be an http(s) URL, got '{}'",
                    provider.provider_type, provider.base_url
                )));
            }
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("Invalid value for {name} '{value}': {e}")))
}
