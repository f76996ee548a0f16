use std::path::PathBuf;

use allyship_core::{Action, DateWindow, Entry};
use chrono::NaiveDate;
use clap::Subcommand;

use super::{CmdResult, Workspace};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved reflections, newest first
    List {
        /// Earliest date to include
        #[arg(long, value_parser = super::parse_date)]
        from: Option<NaiveDate>,
        /// Latest date to include
        #[arg(long, value_parser = super::parse_date)]
        to: Option<NaiveDate>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one saved reflection
    Show {
        #[arg(value_parser = super::parse_date)]
        date: NaiveDate,
        /// Export it into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn first_line(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > width {
        let cut: String = line.chars().take(width).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

pub fn run(action: HistoryAction, today: NaiveDate) -> CmdResult {
    let ws = Workspace::open(today);

    match action {
        HistoryAction::List { from, to, json } => {
            let entries: Vec<&Entry> = match (from, to) {
                (None, None) => ws.state.history.iter().collect(),
                (from, to) => {
                    let window = DateWindow::new(
                        from.unwrap_or(NaiveDate::MIN),
                        to.unwrap_or(NaiveDate::MAX),
                    );
                    let mut found = ws.state.history.window_query(&window);
                    found.reverse();
                    found
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("no saved reflections");
            }
            for entry in entries {
                println!(
                    "{}  {:<10} {:>3}w  {}",
                    entry.date,
                    entry.theme.as_str(),
                    entry.word_count,
                    first_line(&entry.body_text, 50)
                );
            }
        }
        HistoryAction::Show { date, export } => {
            let ws = ws.dispatch(Action::SetDate(date));
            let Some(entry) = ws.state.history.get(date) else {
                return Err(format!("no reflection saved for {date}").into());
            };
            println!("{}  •  Theme: {}", entry.date, entry.theme);
            if let Some(cadence) = entry.cadence {
                println!("Cadence: {}", cadence.label());
            }
            println!();
            println!("Prompt: {}", entry.prompt_text);
            if let Some(action) = &entry.action_text {
                println!("Action: {action}");
            }
            println!();
            println!("{}", entry.body_text);
            println!();
            println!("({} words)", entry.word_count);

            if let Some(dir) = export {
                super::export_viewed_entry(&ws.state, &dir)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_truncates_long_text() {
        assert_eq!(first_line("short\nsecond", 50), "short");
        assert_eq!(first_line("abcdef", 3), "abc…");
        assert_eq!(first_line("", 3), "");
    }
}
