//! Tool definitions and implementations for the agent system.

use crate::error::{MatchdayError, Result};
use crate::football::{FixtureQuery, FootballClient, League, LEAGUES};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// League table for a league and season.
    GetLeagueStandings { league: String, season: u16 },

    /// Top scorers for a league and season.
    GetTopScorers {
        league: String,
        season: u16,
        limit: Option<usize>,
    },

    /// Fixtures for a league and season with optional filters.
    GetFixtures {
        league: String,
        season: u16,
        date: Option<NaiveDate>,
        team: Option<u32>,
        last: Option<u32>,
        next: Option<u32>,
    },

    /// Goals, cards and substitutions in one fixture.
    GetFixtureEvents { fixture_id: u64 },

    /// Leagues that can be referred to by name.
    ListLeagues,
}

impl ToolCall {
    /// Name of the tool as exposed to the model.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::GetLeagueStandings { .. } => "get_league_standings",
            ToolCall::GetTopScorers { .. } => "get_top_scorers",
            ToolCall::GetFixtures { .. } => "get_fixtures",
            ToolCall::GetFixtureEvents { .. } => "get_fixture_events",
            ToolCall::ListLeagues => "list_leagues",
        }
    }
}

/// Tool execution context with access to the football data client.
pub struct ToolContext {
    pub client: Arc<FootballClient>,
    default_scorer_limit: usize,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(client: Arc<FootballClient>) -> Self {
        Self {
            client,
            default_scorer_limit: 10,
        }
    }

    /// Set the number of scorers returned when the model gives no limit.
    pub fn with_default_scorer_limit(mut self, limit: usize) -> Self {
        self.default_scorer_limit = limit.max(1);
        self
    }

    /// Execute a tool call and return the result as a JSON string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::GetLeagueStandings { league, season } => {
                let league_id = League::resolve(league)?;
                let table = self.client.standings(league_id, *season).await?;
                to_json(&table)
            }
            ToolCall::GetTopScorers {
                league,
                season,
                limit,
            } => {
                let league_id = League::resolve(league)?;
                let limit = limit.unwrap_or(self.default_scorer_limit);
                let scorers = self.client.top_scorers(league_id, *season, limit).await?;
                to_json(&scorers)
            }
            ToolCall::GetFixtures {
                league,
                season,
                date,
                team,
                last,
                next,
            } => {
                let query = FixtureQuery {
                    league_id: League::resolve(league)?,
                    season: *season,
                    date: *date,
                    team_id: *team,
                    last: *last,
                    next: *next,
                };
                let fixtures = self.client.fixtures(&query).await?;
                to_json(&fixtures)
            }
            ToolCall::GetFixtureEvents { fixture_id } => {
                let events = self.client.fixture_events(*fixture_id).await?;
                to_json(&events)
            }
            ToolCall::ListLeagues => to_json(&LEAGUES),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let league_param = serde_json::json!({
        "type": "string",
        "description": "League name (e.g. \"Premier League\", \"La Liga\") or numeric API-Football league id"
    });
    let season_param = serde_json::json!({
        "type": "integer",
        "description": "Starting year of the season, e.g. 2024 for the 2024/25 season"
    });

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_league_standings".to_string(),
                description: Some(
                    "Retrieve the standings table for a football league and season. \
                    Returns rank, team, points, games played, wins, draws, losses and goal figures for every team."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "league": league_param,
                        "season": season_param
                    },
                    "required": ["league", "season"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_top_scorers".to_string(),
                description: Some(
                    "Retrieve the top goal scorers for a league and season, ordered by goals scored."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "league": league_param,
                        "season": season_param,
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of players to return (default: 10)",
                            "default": 10
                        }
                    },
                    "required": ["league", "season"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_fixtures".to_string(),
                description: Some(
                    "Find matches in a league and season. Returns fixture ids, kickoff times, status and scores. \
                    Use this to look up the fixture id needed by get_fixture_events."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "league": league_param,
                        "season": season_param,
                        "date": {
                            "type": "string",
                            "description": "Only matches on this date (YYYY-MM-DD)"
                        },
                        "team": {
                            "type": "integer",
                            "description": "Only matches involving this API-Football team id"
                        },
                        "last": {
                            "type": "integer",
                            "description": "Only the last N played matches"
                        },
                        "next": {
                            "type": "integer",
                            "description": "Only the next N scheduled matches"
                        }
                    },
                    "required": ["league", "season"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_fixture_events".to_string(),
                description: Some(
                    "Retrieve the events of a single match: goals, cards, substitutions and VAR decisions \
                    with the minute they happened. Returns an empty list if nothing has been recorded."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "fixture_id": {
                            "type": "integer",
                            "description": "The API-Football fixture id"
                        }
                    },
                    "required": ["fixture_id"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "list_leagues".to_string(),
                description: Some(
                    "List the leagues that can be referred to by name, with their ids and countries."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {}
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = if arguments.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(arguments)
            .map_err(|e| MatchdayError::Agent(format!("Invalid tool arguments: {}", e)))?
    };

    match name {
        "get_league_standings" => Ok(ToolCall::GetLeagueStandings {
            league: required_league(&args)?,
            season: required_season(&args)?,
        }),
        "get_top_scorers" => Ok(ToolCall::GetTopScorers {
            league: required_league(&args)?,
            season: required_season(&args)?,
            limit: optional_count(&args, "limit")?,
        }),
        "get_fixtures" => {
            let date = match args["date"].as_str() {
                Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    MatchdayError::InvalidInput(format!("Invalid 'date' argument: {} (expected YYYY-MM-DD)", s))
                })?),
                None => None,
            };
            Ok(ToolCall::GetFixtures {
                league: required_league(&args)?,
                season: required_season(&args)?,
                date,
                team: optional_count(&args, "team")?,
                last: optional_count(&args, "last")?,
                next: optional_count(&args, "next")?,
            })
        }
        "get_fixture_events" => {
            let fixture_id = match &args["fixture_id"] {
                serde_json::Value::Number(n) => n.as_u64(),
                serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            }
            .ok_or_else(|| MatchdayError::Agent("Missing 'fixture_id' argument".to_string()))?;
            Ok(ToolCall::GetFixtureEvents { fixture_id })
        }
        "list_leagues" => Ok(ToolCall::ListLeagues),
        _ => Err(MatchdayError::Agent(format!("Unknown tool: {}", name))),
    }
}

fn required_league(args: &serde_json::Value) -> Result<String> {
    match &args["league"] {
        serde_json::Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(MatchdayError::Agent("Missing 'league' argument".to_string())),
    }
}

/// A non-negative integer argument; values that do not fit the target type are rejected.
fn optional_count<T: TryFrom<u64>>(args: &serde_json::Value, key: &str) -> Result<Option<T>> {
    match args[key].as_u64() {
        Some(n) => T::try_from(n).map(Some).map_err(|_| {
            MatchdayError::Agent(format!("'{}' argument out of range: {}", key, n))
        }),
        None => Ok(None),
    }
}

/// Seasons arrive as 2024, "2024" or "2024/25"; the starting year is kept.
fn required_season(args: &serde_json::Value) -> Result<u16> {
    let season = match &args["season"] {
        serde_json::Value::Number(n) => n.as_u64().and_then(|s| u16::try_from(s).ok()),
        serde_json::Value::String(s) => s
            .trim()
            .split(['/', '-'])
            .next()
            .and_then(|y| y.trim().parse::<u16>().ok()),
        _ => None,
    };
    season.ok_or_else(|| MatchdayError::Agent("Missing or invalid 'season' argument".to_string()))
}
