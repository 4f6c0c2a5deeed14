//! Matchday - conversational football statistics
//!
//! Answers natural-language football questions by letting an LLM agent call
//! a small set of tools backed by the API-Football statistics service.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `football` - Typed client for the football data API
//! - `agent` - Tool registry and the tool-calling agent loop
//! - `cli` - Command line interface and the HTTP query endpoint
//!
//! # Example
//!
//! ```rust,no_run
//! use matchday::agent::{Agent, QueryResolver};
//! use matchday::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = Agent::from_settings(&settings)?;
//!
//!     let response = agent.resolve("Who tops the Premier League?").await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod football;
pub mod openai;

pub use error::{MatchdayError, Result};
