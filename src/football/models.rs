//! Upstream API-Football payloads and the flat records handed to the agent.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Common envelope of every API-Football response.
///
/// The provider reports most failures (bad key, invalid season, exhausted
/// plan) with HTTP 200 and a non-empty `errors` field, which is either an
/// array of strings or an object of field/message pairs.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub errors: serde_json::Value,
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

impl<T> Envelope<T> {
    /// Collect the error messages carried in the envelope, if any.
    pub fn error_message(&self) -> Option<String> {
        error_text(&self.errors)
    }
}

/// Join an API-Football `errors` value into one message.
///
/// Empty arrays, empty objects, empty strings and null yield `None`.
pub fn error_text(errors: &serde_json::Value) -> Option<String> {
    let messages: Vec<String> = match errors {
        serde_json::Value::Array(items) => items.iter().map(value_text).collect(),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, value_text(msg)))
            .collect(),
        serde_json::Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// === Upstream shapes ===

#[derive(Debug, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsEntry {
    pub league: StandingsLeague,
}

#[derive(Debug, Deserialize)]
pub struct StandingsLeague {
    #[serde(default)]
    pub standings: Vec<Vec<StandingRow>>,
}

#[derive(Debug, Deserialize)]
pub struct StandingRow {
    pub rank: u32,
    pub team: NamedRef,
    pub points: i32,
    #[serde(rename = "goalsDiff", default)]
    pub goals_diff: i32,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    pub all: RecordTotals,
}

#[derive(Debug, Deserialize)]
pub struct RecordTotals {
    #[serde(default)]
    pub played: Option<u32>,
    #[serde(default)]
    pub win: Option<u32>,
    #[serde(default)]
    pub draw: Option<u32>,
    #[serde(default)]
    pub lose: Option<u32>,
    #[serde(default)]
    pub goals: GoalTotals,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalTotals {
    #[serde(rename = "for", default)]
    pub scored: Option<u32>,
    #[serde(default)]
    pub against: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ScorerEntry {
    pub player: ScorerPlayer,
    #[serde(default)]
    pub statistics: Vec<PlayerStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct ScorerPlayer {
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerStatistics {
    pub team: NamedRef,
    #[serde(default)]
    pub games: Option<PlayerGames>,
    #[serde(default)]
    pub goals: Option<PlayerGoals>,
    #[serde(default)]
    pub penalty: Option<PlayerPenalty>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerGames {
    // Upstream spelling.
    #[serde(default)]
    pub appearences: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerGoals {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerPenalty {
    #[serde(default)]
    pub scored: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct EventEntry {
    pub time: EventTime,
    pub team: NamedRef,
    #[serde(default)]
    pub player: Option<NamedRef>,
    #[serde(default)]
    pub assist: Option<NamedRef>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventTime {
    pub elapsed: u32,
    #[serde(default)]
    pub extra: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureEntry {
    pub fixture: FixtureInfo,
    #[serde(default)]
    pub league: Option<FixtureLeague>,
    pub teams: FixtureTeams,
    #[serde(default)]
    pub goals: Option<FixtureGoals>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureInfo {
    pub id: u64,
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub venue: Option<NamedRef>,
    pub status: FixtureStatus,
}

#[derive(Debug, Deserialize)]
pub struct FixtureStatus {
    pub short: String,
    #[serde(default)]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureLeague {
    #[serde(default)]
    pub round: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureTeams {
    pub home: NamedRef,
    pub away: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct FixtureGoals {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

// === Records ===

/// One team's row in a league table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsRecord {
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub played: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draws: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub losses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_for: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_against: Option<u32>,
    pub goal_difference: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl From<StandingRow> for StandingsRecord {
    fn from(row: StandingRow) -> Self {
        Self {
            rank: row.rank,
            team: row.team.name,
            points: row.points,
            played: row.all.played,
            wins: row.all.win,
            draws: row.all.draw,
            losses: row.all.lose,
            goals_for: row.all.goals.scored,
            goals_against: row.all.goals.against,
            goal_difference: row.goals_diff,
            form: row.form.filter(|f| !f.is_empty()),
            group: row.group,
        }
    }
}

/// One entry in a league's top-scorer chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerRecord {
    pub rank: u32,
    pub player: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalties: Option<u32>,
}

impl ScorerRecord {
    /// Build a record from an upstream entry at the given 1-based position.
    pub fn from_entry(rank: u32, entry: ScorerEntry) -> Self {
        let stats = entry.statistics.into_iter().next();
        let (team, goals, assists, appearances, penalties) = match stats {
            Some(s) => (
                s.team.name,
                s.goals.as_ref().and_then(|g| g.total),
                s.goals.as_ref().and_then(|g| g.assists),
                s.games.and_then(|g| g.appearences),
                s.penalty.and_then(|p| p.scored),
            ),
            None => (None, None, None, None, None),
        };

        Self {
            rank,
            player: entry.player.name,
            nationality: entry.player.nationality,
            team,
            goals,
            assists,
            appearances,
            penalties,
        }
    }
}

/// A single event (goal, card, substitution, VAR decision) in a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEventRecord {
    pub minute: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_minute: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<String>,
    pub kind: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl From<EventEntry> for MatchEventRecord {
    fn from(event: EventEntry) -> Self {
        Self {
            minute: event.time.elapsed,
            extra_minute: event.time.extra,
            team: event.team.name,
            player: event.player.and_then(|p| p.name),
            assist: event.assist.and_then(|a| a.name),
            kind: event.kind,
            detail: event.detail.unwrap_or_default(),
            comments: event.comments,
        }
    }
}

/// A scheduled, live or finished match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureRecord {
    pub fixture_id: u64,
    pub kickoff: DateTime<FixedOffset>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl From<FixtureEntry> for FixtureRecord {
    fn from(entry: FixtureEntry) -> Self {
        let goals = entry.goals.unwrap_or(FixtureGoals {
            home: None,
            away: None,
        });

        Self {
            fixture_id: entry.fixture.id,
            kickoff: entry.fixture.date,
            status: entry.fixture.status.short,
            elapsed: entry.fixture.status.elapsed,
            round: entry.league.and_then(|l| l.round),
            home_team: entry.teams.home.name,
            away_team: entry.teams.away.name,
            home_goals: goals.home,
            away_goals: goals.away,
            venue: entry.fixture.venue.and_then(|v| v.name),
        }
    }
}

impl FixtureRecord {
    /// Short scoreline such as "Arsenal 2-1 Chelsea" or "Arsenal vs Chelsea".
    ///
    /// A team the provider did not name is shown as "?".
    pub fn scoreline(&self) -> String {
        let home = self.home_team.as_deref().unwrap_or("?");
        let away = self.away_team.as_deref().unwrap_or("?");
        match (self.home_goals, self.away_goals) {
            (Some(h), Some(a)) => format!("{} {}-{} {}", home, h, a, away),
            _ => format!("{} vs {}", home, away),
        }
    }
}
