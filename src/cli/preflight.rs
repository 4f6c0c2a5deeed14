//! Pre-flight checks before talking to external services.
//!
//! Validates that the required API keys are present before starting
//! operations that would otherwise fail on the first request.

use crate::config::Settings;
use crate::error::{MatchdayError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Agent queries need both the model key and the football key.
    Ask,
    /// Direct data lookups only need the football key.
    Data,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ask => {
            check_key(&settings.agent.api_key_env)?;
            check_key(&settings.football.api_key_env)?;
        }
        Operation::Data => {
            check_key(&settings.football.api_key_env)?;
        }
    }
    Ok(())
}

/// Check that an environment variable holds a non-empty key.
fn check_key(var: &str) -> Result<()> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        Ok(_) => Err(MatchdayError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            var, var
        ))),
        Err(_) => Err(MatchdayError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            var, var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reported_by_name() {
        let mut settings = Settings::default();
        settings.football.api_key_env = "MATCHDAY_PREFLIGHT_UNSET_KEY".to_string();
        let err = check(Operation::Data, &settings).unwrap_err();
        assert!(err.to_string().contains("MATCHDAY_PREFLIGHT_UNSET_KEY"));
    }
}
