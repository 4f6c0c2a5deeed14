//! Configuration settings for Matchday.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub football: FootballSettings,
    pub agent: AgentSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Football data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FootballSettings {
    /// Base URL of the API-Football service.
    pub base_url: String,
    /// Environment variable holding the API-Football key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Number of scorers returned when the caller gives no limit.
    pub default_scorer_limit: usize,
}

impl Default for FootballSettings {
    fn default() -> Self {
        Self {
            base_url: "https://v3.football.api-sports.io".to_string(),
            api_key_env: "API_FOOTBALL_KEY".to_string(),
            timeout_seconds: 30,
            default_scorer_limit: 10,
        }
    }
}

/// LLM agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Chat model used for planning and answering.
    pub model: String,
    /// Environment variable holding the model provider key.
    pub api_key_env: String,
    /// Custom API base for OpenAI-compatible providers.
    pub api_base: Option<String>,
    /// Maximum model round trips per query.
    pub max_iterations: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_base: None,
            max_iterations: 10,
            timeout_seconds: 120,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// TOML file with a custom agent prompt (overrides the default).
    pub custom_file: Option<String>,
    /// Custom variables available in the prompt as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::MatchdayError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("matchday")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Read the API-Football key from the configured environment variable.
    pub fn football_api_key(&self) -> crate::error::Result<String> {
        match std::env::var(&self.football.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(crate::error::MatchdayError::Config(format!(
                "{} not set. Set it with: export {}='<your api-football key>'",
                self.football.api_key_env, self.football.api_key_env
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [agent]
            model = "gpt-4.1"

            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(settings.agent.model, "gpt-4.1");
        assert_eq!(settings.agent.max_iterations, 10);
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.football.api_key_env, "API_FOOTBALL_KEY");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.football.timeout_seconds = 5;
        settings.agent.api_base = Some("http://localhost:1234/v1".to_string());
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.football.timeout_seconds, 5);
        assert_eq!(loaded.agent.api_base.as_deref(), Some("http://localhost:1234/v1"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.football.base_url, "https://v3.football.api-sports.io");
    }

    #[test]
    fn test_football_api_key_missing() {
        let mut settings = Settings::default();
        settings.football.api_key_env = "MATCHDAY_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        assert!(settings.football_api_key().is_err());
    }
}
