use std::sync::Arc;

use social_post_generator::logging::init_tracing;
use social_post_generator::web::create_server;
use social_post_generator::{AppConfig, ProviderRegistry, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level, &config.environment)?;

    let registry = ProviderRegistry::from_configs(&config.gemini, &config.openai)?;
    tracing::info!(
        openai_model = %config.openai.model,
        gemini_model = %config.gemini.model,
        "Providers configured"
    );

    create_server(Arc::new(config), registry).await
}
