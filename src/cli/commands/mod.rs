//! CLI command implementations.

mod ask;
mod config;
mod doctor;
mod events;
mod fixtures;
mod leagues;
mod scorers;
mod serve;
mod standings;

pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
pub use events::run_events;
pub use fixtures::run_fixtures;
pub use leagues::run_leagues;
pub use scorers::run_scorers;
pub use serve::{router, run_serve};
pub use standings::run_standings;
