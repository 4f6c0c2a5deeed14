//! Configuration module for Matchday.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts};
pub use settings::{
    AgentSettings, FootballSettings, GeneralSettings, PromptSettings, ServerSettings, Settings,
};
