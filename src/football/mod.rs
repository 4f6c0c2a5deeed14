//! Football statistics data source.
//!
//! Wraps the API-Football v3 REST service behind typed calls that return
//! flat, read-only records suitable for handing to the agent.

mod client;
mod league;
mod models;

pub use client::{FixtureQuery, FootballClient};
pub use league::{current_season, League, LEAGUES};
pub use models::{FixtureRecord, MatchEventRecord, ScorerRecord, StandingsRecord};
