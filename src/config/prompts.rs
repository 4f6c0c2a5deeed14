//! Prompt templates for Matchday.
//!
//! The agent prompt can be customized by pointing `prompts.custom_file` at a
//! TOML file with an `[agent]` table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the football agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a knowledgeable football (soccer) assistant with live access to the API-Football statistics service.

You have tools to look up league standings, top scorers, fixtures and match events.
Think about which facts the question needs, then call the tools that provide them.

Guidelines:
- Use 'list_leagues' if you are unsure which leagues are supported
- Use 'get_league_standings' for table positions, points and records
- Use 'get_top_scorers' for goal scoring charts
- Use 'get_fixtures' to find matches and their fixture ids
- Use 'get_fixture_events' for goals, cards and substitutions in a single match
- Seasons are identified by their starting year (the 2024/25 season is 2024)
- If a tool returns an error, adjust the arguments or explain the problem to the user

Only report figures returned by the tools. Never invent results, scores or statistics.
Today's date is {{today}}."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, with an optional custom TOML file and template variables.
    pub fn load(
        custom_file: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(file) = custom_file {
            let path = crate::config::Settings::expand_path(file);
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                prompts = toml::from_str(&content)?;
            } else {
                tracing::warn!("Custom prompt file {} not found, using defaults", path.display());
            }
        }

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render the agent system prompt.
    ///
    /// `today` is always provided; custom config variables may override it.
    pub fn agent_system(&self, today: chrono::NaiveDate) -> String {
        let mut vars = HashMap::new();
        vars.insert("today".to_string(), today.format("%Y-%m-%d").to_string());
        for (key, value) in &self.variables {
            vars.insert(key.clone(), value.clone());
        }
        Self::render(&self.agent.system, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.agent.system.contains("get_league_standings"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_agent_system_fills_today() {
        let prompts = Prompts::default();
        let rendered = prompts.agent_system(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert!(rendered.contains("Today's date is 2025-03-09."));
        assert!(!rendered.contains("{{today}}"));
    }

    #[test]
    fn test_load_custom_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.toml");
        std::fs::write(
            &path,
            "[agent]\nsystem = \"You only talk about {{club}}.\"\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert("club".to_string(), "Arsenal".to_string());
        let prompts = Prompts::load(path.to_str(), Some(&vars)).unwrap();

        let rendered = prompts.agent_system(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(rendered, "You only talk about Arsenal.");
    }
}
