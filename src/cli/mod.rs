//! CLI module for Matchday.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Matchday - conversational football statistics
///
/// Ask questions about leagues, scorers and matches in plain language, or
/// query the football data service directly.
#[derive(Parser, Debug)]
#[command(name = "matchday")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP query endpoint
    Serve {
        /// Host to bind to (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a football question in natural language
    Ask {
        /// The question to ask
        query: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the league table
    Standings {
        /// League name or id (e.g. "premier league", 39)
        league: String,

        /// Season starting year (defaults to the current season)
        #[arg(short, long)]
        season: Option<u16>,
    },

    /// Show the top scorers of a league
    Scorers {
        /// League name or id
        league: String,

        /// Season starting year (defaults to the current season)
        #[arg(short, long)]
        season: Option<u16>,

        /// Maximum number of players
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List fixtures of a league
    Fixtures {
        /// League name or id
        league: String,

        /// Season starting year (defaults to the current season)
        #[arg(short, long)]
        season: Option<u16>,

        /// Only matches on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<chrono::NaiveDate>,

        /// Only matches involving this team id
        #[arg(short, long)]
        team: Option<u32>,

        /// Only the last N played matches
        #[arg(long, conflicts_with = "next")]
        last: Option<u32>,

        /// Only the next N scheduled matches
        #[arg(long)]
        next: Option<u32>,
    },

    /// Show the events of a single fixture
    Events {
        /// Fixture id
        fixture_id: u64,
    },

    /// List leagues that can be referred to by name
    Leagues,

    /// Check API keys and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixtures_command() {
        let cli = Cli::try_parse_from([
            "matchday", "fixtures", "la liga", "--season", "2024", "--date", "2024-08-18",
        ])
        .unwrap();
        match cli.command {
            Commands::Fixtures { league, season, date, .. } => {
                assert_eq!(league, "la liga");
                assert_eq!(season, Some(2024));
                assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2024, 8, 18));
            }
            other => panic!("Expected Fixtures command, got {:?}", other),
        }
    }

    #[test]
    fn test_last_and_next_conflict() {
        let result = Cli::try_parse_from(["matchday", "fixtures", "mls", "--last", "3", "--next", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::try_parse_from(["matchday", "leagues", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
