//! CLI output formatting utilities.

use crate::football::{FixtureRecord, MatchEventRecord, ScorerRecord, StandingsRecord};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a league table.
    pub fn standings(rows: &[StandingsRecord]) {
        println!(
            "  {}",
            style(format!(
                "{:>3}  {:<26} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4}",
                "#", "Team", "P", "W", "D", "L", "Goals", "Pts"
            ))
            .dim()
        );

        let mut group: Option<&str> = None;
        for row in rows {
            if row.group.as_deref() != group && rows.iter().any(|r| r.group != rows[0].group) {
                group = row.group.as_deref();
                println!("  {}", style(group.unwrap_or("")).bold());
            }
            println!(
                "  {:>3}  {:<26} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4}",
                row.rank,
                truncate(row.team.as_deref().unwrap_or("?"), 26),
                or_dash(row.played),
                or_dash(row.wins),
                or_dash(row.draws),
                or_dash(row.losses),
                format!("{}:{}", or_dash(row.goals_for), or_dash(row.goals_against)),
                style(row.points).bold()
            );
        }
    }

    /// Print a scorer chart entry.
    pub fn scorer(scorer: &ScorerRecord) {
        let extra = match (scorer.assists, scorer.penalties) {
            (Some(a), Some(p)) if p > 0 => format!(" ({} assists, {} pens)", a, p),
            (Some(a), _) => format!(" ({} assists)", a),
            _ => String::new(),
        };
        println!(
            "  {:>3}. {} {} - {} goals{}",
            scorer.rank,
            style(&scorer.player).bold(),
            style(format!("({})", scorer.team.as_deref().unwrap_or("?"))).dim(),
            style(or_dash(scorer.goals)).green(),
            extra
        );
    }

    /// Print a fixture line.
    pub fn fixture(fixture: &FixtureRecord) {
        println!(
            "  {} {} {} {}",
            style(fixture.kickoff.format("%Y-%m-%d %H:%M")).dim(),
            style(format!("[{}]", fixture.status)).cyan(),
            style(fixture.scoreline()).bold(),
            style(format!("(id {})", fixture.fixture_id)).dim()
        );
    }

    /// Print a match event line.
    pub fn event(event: &MatchEventRecord) {
        let minute = match event.extra_minute {
            Some(extra) => format!("{}+{}'", event.minute, extra),
            None => format!("{}'", event.minute),
        };
        let who = match (&event.player, &event.assist) {
            (Some(p), Some(a)) => format!("{} (assist {})", p, a),
            (Some(p), None) => p.clone(),
            _ => String::new(),
        };
        println!(
            "  {:>6} {} {} {} {}",
            style(minute).cyan(),
            style(&event.kind).bold(),
            event.detail,
            who,
            style(format!("- {}", event.team.as_deref().unwrap_or("?"))).dim()
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate text with ellipsis on a char boundary.
/// Render a count the provider may have left out.
fn or_dash(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
