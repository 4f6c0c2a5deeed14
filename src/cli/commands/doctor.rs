//! Doctor command - verify API keys and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Matchday Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let key_checks = vec![
        check_model_key(&settings.agent.api_key_env, std::env::var(&settings.agent.api_key_env).ok()),
        check_football_key(
            &settings.football.api_key_env,
            std::env::var(&settings.football.api_key_env).ok(),
        ),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![
        check_config_file(),
        check_base_url(&settings.football.base_url),
        CheckResult::ok("Model", &settings.agent.model),
    ];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Matchday.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Matchday is ready to use.");
    }

    Ok(())
}

/// Check the model provider key.
fn check_model_key(var: &str, value: Option<String>) -> CheckResult {
    let hint = format!("Set with: export {}='sk-...'", var);
    match value {
        Some(key) if key.starts_with("sk-") && key.len() > 20 => {
            CheckResult::ok(var, &format!("configured ({})", mask(&key)))
        }
        Some(key) if key.is_empty() => CheckResult::error(var, "empty", &hint),
        Some(_) => CheckResult::warning(
            var,
            "set but format looks unusual",
            "Expected format: sk-... (fine for OpenAI-compatible providers)",
        ),
        None => CheckResult::error(var, "not set", &hint),
    }
}

/// Check the API-Football key.
fn check_football_key(var: &str, value: Option<String>) -> CheckResult {
    let hint = format!(
        "Get a key at https://dashboard.api-football.com and set: export {}='...'",
        var
    );
    match value {
        Some(key) if key.trim().is_empty() => CheckResult::error(var, "empty", &hint),
        Some(key) => CheckResult::ok(var, &format!("configured ({})", mask(&key))),
        None => CheckResult::error(var, "not set", &hint),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: matchday config init",
        )
    }
}

/// Check that the data provider URL parses.
fn check_base_url(base_url: &str) -> CheckResult {
    match url::Url::parse(base_url) {
        Ok(url) if url.scheme() == "https" => CheckResult::ok("Football API", base_url),
        Ok(_) => CheckResult::warning(
            "Football API",
            base_url,
            "Not using https; the API key is sent in clear text",
        ),
        Err(e) => CheckResult::error(
            "Football API",
            &format!("invalid base_url: {}", e),
            "Fix football.base_url in the config file",
        ),
    }
}

/// Mask a secret, keeping a short prefix and suffix.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_model_key_checks() {
        let ok = check_model_key("OPENAI_API_KEY", Some("sk-abcdefghijklmnopqrstuvwxyz".to_string()));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert!(!ok.message.contains("ghijklmnop"));

        let missing = check_model_key("OPENAI_API_KEY", None);
        assert_eq!(missing.status, CheckStatus::Error);

        let odd = check_model_key("OPENAI_API_KEY", Some("local-key".to_string()));
        assert_eq!(odd.status, CheckStatus::Warning);
    }

    #[test]
    fn test_football_key_checks() {
        assert_eq!(
            check_football_key("API_FOOTBALL_KEY", Some("  ".to_string())).status,
            CheckStatus::Error
        );
        assert_eq!(
            check_football_key("API_FOOTBALL_KEY", Some("0123456789abcdef".to_string())).status,
            CheckStatus::Ok
        );
    }

    #[test]
    fn test_base_url_checks() {
        assert_eq!(check_base_url("https://v3.football.api-sports.io").status, CheckStatus::Ok);
        assert_eq!(check_base_url("http://localhost:8080").status, CheckStatus::Warning);
        assert_eq!(check_base_url("not a url").status, CheckStatus::Error);
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask("0123456789abcdef"), "0123...cdef");
    }
}
