//! Structured logging setup.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::error::{Error, Result};

/// Initialize the logging system.
///
/// Production gets JSON lines; anything else gets pretty, human-readable output.
/// `RUST_LOG` takes precedence over `log_level`.
pub fn init_tracing(log_level: &str, environment: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "social_post_generator={log_level},tower_http={log_level}"
        ))
    });

    if environment == "production" {
        let formatting_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| Error::server(format!("Failed to initialize tracing: {e}")))?;
    } else {
        let formatting_layer = fmt::layer()
            .pretty()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| Error::server(format!("Failed to initialize tracing: {e}")))?;
    }

    tracing::info!(environment, log_level, "Logging initialized");

    Ok(())
}
