use std::path::PathBuf;

use allyship_core::calendar::{sprint_calendar, sprint_file_name};
use allyship_core::{sprint_effective_window, Action};
use chrono::NaiveDate;
use clap::Subcommand;

use super::{CmdResult, Workspace};

#[derive(Subcommand)]
pub enum SprintAction {
    /// Start a 14-day sprint
    Start {
        /// First day of the sprint (defaults to today)
        #[arg(long, value_parser = super::parse_date)]
        date: Option<NaiveDate>,
    },
    /// End the active sprint
    End,
    /// Show sprint progress
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the sprint days as an .ics calendar
    Ics {
        /// Directory to write the calendar into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

pub fn run(action: SprintAction, today: NaiveDate) -> CmdResult {
    let ws = Workspace::open(today);

    match action {
        SprintAction::Start { date } => {
            let start = date.unwrap_or(today);
            if let Some(current) = ws.state.active_sprint() {
                tracing::info!(previous = %current.start_date, "replacing active sprint");
            }
            let ws = ws.dispatch(Action::StartSprint(start));
            if let Some(sprint) = ws.state.active_sprint() {
                println!("sprint started: {}", sprint.banner(today));
            }
        }
        SprintAction::End => {
            if ws.state.active_sprint().is_none() {
                return Err("no active sprint".into());
            }
            ws.dispatch(Action::EndSprint);
            println!("sprint ended");
        }
        SprintAction::Status { json } => {
            let Some(sprint) = ws.state.active_sprint() else {
                if json {
                    println!("null");
                } else {
                    println!("no active sprint");
                }
                return Ok(());
            };
            let progress = sprint.progress(today);
            let window = sprint_effective_window(sprint, today)?;
            let entries = ws.state.history.window_query(&window).len();
            if json {
                let value = serde_json::json!({
                    "sprint": sprint,
                    "progress": progress,
                    "entries": entries,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }
            println!("{}", sprint.banner(today));
            println!("Ends: {}", sprint.end_date()?);
            println!("Reflections so far: {entries}");
            if progress.is_over {
                println!("This sprint is over; export its summary or start a new one.");
            }
        }
        SprintAction::Ics { out } => {
            let Some(sprint) = ws.state.sprint.as_ref() else {
                return Err("no sprint to export; start one first".into());
            };
            let artifact = sprint_calendar(sprint).into_artifact(sprint_file_name(sprint));
            super::save_artifact(&artifact, &out)?;
        }
    }
    Ok(())
}
