use std::path::PathBuf;

use allyship_core::cadence::next_occurrence;
use allyship_core::calendar::{cadence_calendar, CADENCE_FILE_NAME};
use allyship_core::dates::shift_days;
use allyship_core::{Action, Cadence};
use chrono::NaiveDate;
use clap::Subcommand;

use super::{CmdResult, Workspace};

#[derive(Subcommand)]
pub enum CadenceAction {
    /// Set the reminder cadence (daily, 3x, weekly, self)
    Set {
        cadence: String,
        /// First reminder date (defaults to the saved start, or today)
        #[arg(long, value_parser = super::parse_date)]
        start: Option<NaiveDate>,
    },
    /// Export the cadence as a recurring .ics event
    Ics {
        /// Directory to write the calendar into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List upcoming reminder dates
    Upcoming {
        /// How many dates to show
        #[arg(long, default_value_t = 7)]
        count: usize,
    },
}

/// Look-ahead used when listing upcoming reminders.
const UPCOMING_HORIZON_DAYS: i64 = 366;

pub fn run(action: CadenceAction, today: NaiveDate) -> CmdResult {
    let mut ws = Workspace::open(today);

    match action {
        CadenceAction::Set { cadence, start } => {
            let cadence: Cadence = cadence.parse()?;
            ws = ws.dispatch(Action::SetCadence(cadence));
            if start.is_some() || ws.state.prefs.cadence_start.is_none() {
                ws = ws.dispatch(Action::SetCadenceStart(Some(start.unwrap_or(today))));
            }
            match ws.state.prefs.cadence_start_iso() {
                Some(start) if cadence.is_recurring() => {
                    println!("cadence set to {} from {start}", cadence.label())
                }
                _ => println!("cadence set to {}", cadence.label()),
            }
            let from = ws.state.prefs.cadence_config(today).start_date.max(today);
            if let Some(next) = next_occurrence(cadence, from) {
                println!("next reminder: {next}");
            }
        }
        CadenceAction::Ics { out } => {
            let config = ws.state.prefs.cadence_config(today);
            let calendar = cadence_calendar(config.cadence, config.start_date)?;
            super::save_artifact(&calendar.into_artifact(CADENCE_FILE_NAME), &out)?;
        }
        CadenceAction::Upcoming { count } => {
            let config = ws.state.prefs.cadence_config(today);
            if !config.cadence.is_recurring() {
                println!("self-paced: no scheduled reminders");
                return Ok(());
            }
            let horizon = shift_days(today, UPCOMING_HORIZON_DAYS)?;
            for day in config
                .occurrences(horizon)
                .filter(|d| *d >= today)
                .take(count)
            {
                println!("{}  {}", day, day.format("%a"));
            }
        }
    }
    Ok(())
}
