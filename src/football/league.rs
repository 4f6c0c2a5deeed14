//! Directory of supported leagues and season helpers.

use crate::error::{MatchdayError, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A league known by name to the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct League {
    pub name: &'static str,
    pub id: u32,
    pub country: &'static str,
    #[serde(skip)]
    aliases: &'static [&'static str],
}

/// Leagues users commonly ask about, keyed by API-Football league id.
pub const LEAGUES: &[League] = &[
    League {
        name: "Premier League",
        id: 39,
        country: "England",
        aliases: &["epl", "english premier league", "prem"],
    },
    League {
        name: "La Liga",
        id: 140,
        country: "Spain",
        aliases: &["laliga", "primera division"],
    },
    League {
        name: "Bundesliga",
        id: 78,
        country: "Germany",
        aliases: &["1. bundesliga"],
    },
    League {
        name: "Serie A",
        id: 135,
        country: "Italy",
        aliases: &["seriea"],
    },
    League {
        name: "Ligue 1",
        id: 61,
        country: "France",
        aliases: &["ligue1"],
    },
    League {
        name: "MLS",
        id: 253,
        country: "USA",
        aliases: &["major league soccer"],
    },
    League {
        name: "Champions League",
        id: 2,
        country: "World",
        aliases: &["ucl", "uefa champions league"],
    },
];

impl League {
    /// Find a known league by name or alias, ignoring case.
    pub fn by_name(name: &str) -> Option<&'static League> {
        let needle = name.trim().to_lowercase();
        LEAGUES
            .iter()
            .find(|l| l.name.to_lowercase() == needle || l.aliases.contains(&needle.as_str()))
    }

    /// Resolve user input to a league id.
    ///
    /// Accepts a known league name or any positive numeric id, so leagues
    /// outside the directory are still reachable.
    pub fn resolve(input: &str) -> Result<u32> {
        let trimmed = input.trim();
        if let Ok(id) = trimmed.parse::<u32>() {
            if id == 0 {
                return Err(MatchdayError::InvalidInput(
                    "league id must be a positive integer".to_string(),
                ));
            }
            return Ok(id);
        }

        League::by_name(trimmed)
            .map(|l| l.id)
            .ok_or_else(|| MatchdayError::LeagueNotFound(trimmed.to_string()))
    }
}

/// Season start year for a given date.
///
/// European seasons straddle two calendar years and are identified by the
/// year they start in; a new season is assumed from July onwards.
pub fn current_season(today: NaiveDate) -> u16 {
    let year = today.year() as u16;
    if today.month() >= 7 {
        year
    } else {
        year - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name_case_insensitive() {
        assert_eq!(League::resolve("premier league").unwrap(), 39);
        assert_eq!(League::resolve("  La Liga ").unwrap(), 140);
        assert_eq!(League::resolve("UCL").unwrap(), 2);
    }

    #[test]
    fn test_resolve_numeric_id() {
        assert_eq!(League::resolve("203").unwrap(), 203);
        assert!(matches!(
            League::resolve("0"),
            Err(MatchdayError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_league() {
        assert!(matches!(
            League::resolve("sunday league"),
            Err(MatchdayError::LeagueNotFound(name)) if name == "sunday league"
        ));
    }

    #[test]
    fn test_current_season() {
        let may = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let august = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(current_season(may), 2024);
        assert_eq!(current_season(august), 2025);
    }
}
