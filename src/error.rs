//! Error types for Matchday.

use thiserror::Error;

/// Library-level error type for Matchday operations.
#[derive(Error, Debug)]
pub enum MatchdayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown league: {0}. Use list_leagues to see supported names, or pass a numeric league id.")]
    LeagueNotFound(String),

    #[error("Football API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Football API rate limit reached: {0}")]
    RateLimited(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Matchday operations.
pub type Result<T> = std::result::Result<T, MatchdayError>;
