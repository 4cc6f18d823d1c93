use reqwest::header::HeaderValue;
use std::fmt;

use crate::Error;

/// A caller-supplied API key.
///
/// Lives only for the duration of one request and is never logged: the
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key. Returns `None` when the key is blank.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for placing on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Build a header value carrying the key, optionally with a scheme prefix.
    pub fn header_value(&self, scheme: Option<&str>) -> Result<HeaderValue, Error> {
        let raw = match scheme {
            Some(scheme) => format!("{scheme} {}", self.0),
            None => self.0.clone(),
        };
        let mut value = HeaderValue::from_str(&raw).map_err(|_| {
            Error::auth("API key contains characters that cannot be sent in an HTTP header")
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
