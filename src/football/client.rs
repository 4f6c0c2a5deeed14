//! HTTP client for the API-Football v3 service.

use super::models::{
    error_text, Envelope, EventEntry, FixtureEntry, FixtureRecord, MatchEventRecord, ScorerEntry,
    ScorerRecord, StandingsEntry, StandingsRecord,
};
use crate::config::Settings;
use crate::error::{MatchdayError, Result};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-apisports-key";
/// Host header expected by the provider (also accepted via RapidAPI).
const API_HOST_HEADER: &str = "x-rapidapi-host";
const API_HOST: &str = "v3.football.api-sports.io";

/// Optional filters for fixture lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureQuery {
    pub league_id: u32,
    pub season: u16,
    pub date: Option<NaiveDate>,
    pub team_id: Option<u32>,
    pub last: Option<u32>,
    pub next: Option<u32>,
}

/// Thin typed wrapper over the football statistics API.
///
/// Every call validates its identifiers, issues exactly one GET and maps
/// the response into records. There is no retry or caching layer.
#[derive(Debug, Clone)]
pub struct FootballClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl FootballClient {
    /// Create a client for the given base URL and API key.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| MatchdayError::Config(format!("Invalid football base_url: {}", e)))?;
        // Keep any path prefix when joining endpoint paths.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from settings, reading the API key from the environment.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.football_api_key()?;
        Self::new(
            &settings.football.base_url,
            &api_key,
            Duration::from_secs(settings.football.timeout_seconds),
        )
    }

    /// League table for a league and season, all groups flattened in order.
    #[instrument(skip(self))]
    pub async fn standings(&self, league_id: u32, season: u16) -> Result<Vec<StandingsRecord>> {
        validate_league(league_id)?;
        validate_season(season)?;

        let envelope: Envelope<StandingsEntry> = self
            .get(
                "standings",
                &[("league", league_id.to_string()), ("season", season.to_string())],
            )
            .await?;

        let records: Vec<StandingsRecord> = envelope
            .response
            .into_iter()
            .flat_map(|entry| entry.league.standings)
            .flatten()
            .map(StandingsRecord::from)
            .collect();

        if records.is_empty() {
            return Err(MatchdayError::NoData(format!(
                "No standings found for league {} in season {}",
                league_id, season
            )));
        }

        debug!("Parsed {} standings rows", records.len());
        Ok(records)
    }

    /// Top scorers for a league and season, at most `limit`, in upstream order.
    #[instrument(skip(self))]
    pub async fn top_scorers(
        &self,
        league_id: u32,
        season: u16,
        limit: usize,
    ) -> Result<Vec<ScorerRecord>> {
        validate_league(league_id)?;
        validate_season(season)?;
        if limit == 0 {
            return Err(MatchdayError::InvalidInput(
                "limit must be at least 1".to_string(),
            ));
        }

        let envelope: Envelope<ScorerEntry> = self
            .get(
                "players/topscorers",
                &[("league", league_id.to_string()), ("season", season.to_string())],
            )
            .await?;

        Ok(envelope
            .response
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, entry)| ScorerRecord::from_entry(i as u32 + 1, entry))
            .collect())
    }

    /// Events recorded for a single fixture. A fixture without events yields
    /// an empty list.
    #[instrument(skip(self))]
    pub async fn fixture_events(&self, fixture_id: u64) -> Result<Vec<MatchEventRecord>> {
        if fixture_id == 0 {
            return Err(MatchdayError::InvalidInput(
                "fixture id must be a positive integer".to_string(),
            ));
        }

        let envelope: Envelope<EventEntry> = self
            .get("fixtures/events", &[("fixture", fixture_id.to_string())])
            .await?;

        Ok(envelope
            .response
            .into_iter()
            .map(MatchEventRecord::from)
            .collect())
    }

    /// Fixtures for a league and season, optionally narrowed by date, team,
    /// or the last/next N matches.
    #[instrument(skip(self))]
    pub async fn fixtures(&self, query: &FixtureQuery) -> Result<Vec<FixtureRecord>> {
        validate_league(query.league_id)?;
        validate_season(query.season)?;
        if query.last.is_some() && query.next.is_some() {
            return Err(MatchdayError::InvalidInput(
                "last and next cannot be combined".to_string(),
            ));
        }

        let mut params = vec![
            ("league", query.league_id.to_string()),
            ("season", query.season.to_string()),
        ];
        if let Some(date) = query.date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(team) = query.team_id {
            params.push(("team", team.to_string()));
        }
        if let Some(last) = query.last {
            params.push(("last", last.to_string()));
        }
        if let Some(next) = query.next {
            params.push(("next", next.to_string()));
        }

        let envelope: Envelope<FixtureEntry> = self.get("fixtures", &params).await?;

        Ok(envelope
            .response
            .into_iter()
            .map(FixtureRecord::from)
            .collect())
    }

    /// Issue one authenticated GET and decode the envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Envelope<T>> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| MatchdayError::Config(format!("Invalid endpoint {}: {}", endpoint, e)))?;

        info!("Fetching {} {:?}", url, params);

        let response = self
            .http
            .get(url.clone())
            .query(params)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(API_HOST_HEADER, API_HOST)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Response status: {}, {} bytes", status, body.len());

        if !status.is_success() {
            error!("HTTP {} from {}", status.as_u16(), url);
            return Err(status_error(status, &body));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if let Some(message) = envelope.error_message() {
            error!("API-Football reported errors for {}: {}", url, message);
            if is_rate_limit_message(&message) {
                return Err(MatchdayError::RateLimited(message));
            }
            return Err(MatchdayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope)
    }
}

/// Map a non-success status to an error, preferring the provider's message.
fn status_error(status: StatusCode, body: &str) -> MatchdayError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .or_else(|| v.get("errors").and_then(error_text))
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    if status == StatusCode::TOO_MANY_REQUESTS {
        MatchdayError::RateLimited(message)
    } else {
        MatchdayError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}

fn is_rate_limit_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("ratelimit") || lower.contains("rate limit") || lower.contains("too many requests")
}

fn validate_league(league_id: u32) -> Result<()> {
    if league_id == 0 {
        return Err(MatchdayError::InvalidInput(
            "league id must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn validate_season(season: u16) -> Result<()> {
    if !(1900..=2100).contains(&season) {
        return Err(MatchdayError::InvalidInput(format!(
            "season must be a four-digit starting year, got {}",
            season
        )));
    }
    Ok(())
}
