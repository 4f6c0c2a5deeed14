//! OpenAI client configuration.

use crate::config::AgentSettings;
use crate::error::{MatchdayError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client from agent settings.
///
/// The API key is read from the environment variable named by
/// `api_key_env`. A custom `api_base` points the client at any
/// OpenAI-compatible provider.
pub fn create_client(settings: &AgentSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
        MatchdayError::Config(format!(
            "{} not set. Set it with: export {}='sk-...'",
            settings.api_key_env, settings.api_key_env
        ))
    })?;

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = settings.api_base.as_deref().filter(|b| !b.is_empty()) {
        config = config.with_api_base(base);
    }

    create_client_with_config(config, Duration::from_secs(settings.timeout_seconds))
}

/// Create an OpenAI client with an explicit config and timeout.
pub fn create_client_with_config(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
