//! Ask command implementation.

use crate::agent::Agent;
use crate::cli::output::truncate;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(query: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'matchday doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.agent.model = model;
    }

    let agent = Agent::from_settings(&settings)?;

    let spinner = Output::spinner("Looking it up...");

    match agent.run(query).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    let marker = if call.succeeded { "" } else { " (failed)" };
                    Output::list_item(&format!(
                        "{} {}{}",
                        call.name,
                        truncate(&call.arguments, 60),
                        marker
                    ));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s) with {}",
                response.iterations,
                agent.model()
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
