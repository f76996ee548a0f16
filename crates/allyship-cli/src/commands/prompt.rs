use allyship_core::{Cadence, PromptTable, ThemeFilter};
use chrono::NaiveDate;
use clap::Args;

use super::{CmdResult, Workspace};

#[derive(Args)]
pub struct PromptArgs {
    /// Date to show the prompt for (defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,
    /// Override the saved cadence (daily, 3x, weekly, self)
    #[arg(long)]
    cadence: Option<String>,
    /// Override the saved theme filter
    #[arg(long)]
    theme: Option<String>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PromptArgs, today: NaiveDate) -> CmdResult {
    let mut state = Workspace::open(today).state;
    state.viewing = args.date.unwrap_or(today);
    if let Some(cadence) = args.cadence {
        state.prefs.cadence = cadence.parse::<Cadence>()?;
    }
    if let Some(theme) = args.theme {
        state.prefs.theme = theme.parse::<ThemeFilter>()?;
    }

    let selection = state.prompt(PromptTable::builtin());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
        return Ok(());
    }

    println!(
        "{}  •  {}  •  {}",
        state.viewing,
        state.prefs.cadence.label(),
        state.prefs.theme.heading()
    );
    if let Some(banner) = state.sprint_banner() {
        println!("Sprint: {banner}");
    }
    println!();
    println!("Reflection: {}", selection.pair.reflection);
    println!("Action: {}", selection.pair.action);
    if selection.theme_fallback {
        println!();
        println!(
            "(no {} prompts for {}; showing the full pool)",
            selection.category, state.prefs.theme
        );
    }
    if let Some(entry) = state.history.get(state.viewing) {
        println!();
        println!("Saved reflection ({} words):", entry.word_count);
        println!("{}", entry.body_text);
    }
    Ok(())
}
