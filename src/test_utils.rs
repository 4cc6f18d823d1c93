//! Test utilities
//!
//! A scripted provider that records every prompt it receives, for exercising
//! the generator and the web layer without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{ApiKey, Error, LLMProvider, Platform, Prompt};

type ErrorFactory = Arc<dyn Fn() -> Error + Send + Sync>;

/// Provider double that answers from a script and records its calls.
#[derive(Clone)]
pub struct RecordingProvider {
    reply: Option<String>,
    failure: Option<ErrorFactory>,
    platform_failures: HashMap<Platform, ErrorFactory>,
    credential_error: Option<String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingProvider {
    /// A provider that answers every prompt with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            failure: None,
            platform_failures: HashMap::new(),
            credential_error: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails.
    pub fn failing_with<F>(make_error: F) -> Self
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        let mut provider = Self::replying("");
        provider.reply = None;
        provider.failure = Some(Arc::new(make_error));
        provider
    }

    /// Fail only the prompts written for `platform`.
    pub fn fail_on<F>(mut self, platform: Platform, make_error: F) -> Self
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        self.platform_failures.insert(platform, Arc::new(make_error));
        self
    }

    /// Reject every credential at validation time.
    pub fn rejecting_credentials(mut self, message: impl Into<String>) -> Self {
        self.credential_error = Some(message.into());
        self
    }

    /// Wait this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of generation calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn platform_of(prompt: &str) -> Option<Platform> {
        Platform::ALL
            .into_iter()
            .find(|p| prompt.starts_with(&format!("Generate a {} post", p.name())))
    }
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    async fn generate_text(&self, prompt: &Prompt, _credential: &ApiKey) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.as_str().to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(make_error) = Self::platform_of(prompt.as_str())
            .and_then(|platform| self.platform_failures.get(&platform))
        {
            return Err(make_error());
        }

        match (&self.failure, &self.reply) {
            (Some(make_error), _) => Err(make_error()),
            (None, Some(reply)) => Ok(reply.clone()),
            (None, None) => Err(Error::provider("Recording", "no reply scripted")),
        }
    }

    fn validate_credential(&self, credential: &ApiKey) -> Result<(), Error> {
        match &self.credential_error {
            Some(message) => Err(Error::auth(message.clone())),
            None => credential.header_value(None).map(|_| ()),
        }
    }
}
