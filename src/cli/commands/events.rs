//! Events command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::football::FootballClient;
use anyhow::Result;

/// Run the events command.
pub async fn run_events(fixture_id: u64, settings: Settings) -> Result<()> {
    preflight::check(Operation::Data, &settings)?;

    let client = FootballClient::from_settings(&settings)?;
    let events = client.fixture_events(fixture_id).await?;

    if events.is_empty() {
        Output::info(&format!("No events recorded for fixture {}.", fixture_id));
        return Ok(());
    }

    Output::header(&format!("Fixture {} - {} events", fixture_id, events.len()));
    println!();
    for event in &events {
        Output::event(event);
    }
    println!();

    Ok(())
}
