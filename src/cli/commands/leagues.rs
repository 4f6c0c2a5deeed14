//! Leagues command implementation.

use crate::cli::Output;
use crate::football::LEAGUES;

/// Run the leagues command.
pub fn run_leagues() {
    Output::header(&format!("Known leagues ({})", LEAGUES.len()));
    println!();
    for league in LEAGUES {
        Output::list_item(&format!("{} (id {}, {})", league.name, league.id, league.country));
    }
    println!();
    Output::info("Any other league can be queried by its numeric API-Football id.");
}
