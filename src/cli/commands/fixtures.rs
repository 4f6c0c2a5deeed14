//! Fixtures command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::football::{current_season, FixtureQuery, FootballClient, League};
use anyhow::Result;
use chrono::NaiveDate;

/// Run the fixtures command.
#[allow(clippy::too_many_arguments)]
pub async fn run_fixtures(
    league: &str,
    season: Option<u16>,
    date: Option<NaiveDate>,
    team: Option<u32>,
    last: Option<u32>,
    next: Option<u32>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Data, &settings)?;

    let query = FixtureQuery {
        league_id: League::resolve(league)?,
        season: season.unwrap_or_else(|| current_season(chrono::Local::now().date_naive())),
        date,
        team_id: team,
        last,
        next,
    };
    let client = FootballClient::from_settings(&settings)?;

    let fixtures = client.fixtures(&query).await?;
    if fixtures.is_empty() {
        Output::info("No fixtures match these filters.");
        return Ok(());
    }

    Output::header(&format!("Fixtures ({})", fixtures.len()));
    println!();
    for fixture in &fixtures {
        Output::fixture(fixture);
    }
    println!();

    Ok(())
}
