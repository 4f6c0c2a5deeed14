//! Standings command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::football::{current_season, FootballClient, League};
use anyhow::Result;

/// Run the standings command.
pub async fn run_standings(league: &str, season: Option<u16>, settings: Settings) -> Result<()> {
    preflight::check(Operation::Data, &settings)?;

    let league_id = League::resolve(league)?;
    let season = season.unwrap_or_else(|| current_season(chrono::Local::now().date_naive()));
    let client = FootballClient::from_settings(&settings)?;

    match client.standings(league_id, season).await {
        Ok(rows) => {
            Output::header(&format!("{} - {}/{:02}", league, season, (season + 1) % 100));
            println!();
            Output::standings(&rows);
            println!();
        }
        Err(e) => {
            Output::error(&format!("Failed to fetch standings: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
