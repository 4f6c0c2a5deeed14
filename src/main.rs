//! Matchday CLI entry point.

use anyhow::Result;
use clap::Parser;
use matchday::cli::{commands, Cli, Commands};
use matchday::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("matchday={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Ask { query, model } => {
            commands::run_ask(query, model.clone(), settings).await?;
        }

        Commands::Standings { league, season } => {
            commands::run_standings(league, *season, settings).await?;
        }

        Commands::Scorers {
            league,
            season,
            limit,
        } => {
            commands::run_scorers(league, *season, *limit, settings).await?;
        }

        Commands::Fixtures {
            league,
            season,
            date,
            team,
            last,
            next,
        } => {
            commands::run_fixtures(league, *season, *date, *team, *last, *next, settings).await?;
        }

        Commands::Events { fixture_id } => {
            commands::run_events(*fixture_id, settings).await?;
        }

        Commands::Leagues => {
            commands::run_leagues();
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path)?;
        }
    }

    Ok(())
}
