//! Scorers command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::football::{current_season, FootballClient, League};
use anyhow::Result;

/// Run the scorers command.
pub async fn run_scorers(
    league: &str,
    season: Option<u16>,
    limit: Option<usize>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Data, &settings)?;

    let league_id = League::resolve(league)?;
    let season = season.unwrap_or_else(|| current_season(chrono::Local::now().date_naive()));
    let limit = limit.unwrap_or(settings.football.default_scorer_limit);
    let client = FootballClient::from_settings(&settings)?;

    let scorers = client.top_scorers(league_id, season, limit).await?;
    if scorers.is_empty() {
        Output::info("No scorers recorded for this league and season.");
        return Ok(());
    }

    Output::header(&format!("Top scorers - {} {}", league, season));
    println!();
    for scorer in &scorers {
        Output::scorer(scorer);
    }
    println!();

    Ok(())
}
