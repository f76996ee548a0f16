use std::path::PathBuf;

use allyship_core::{Action, ExportAdapter, TextDocumentAdapter};
use chrono::NaiveDate;
use clap::Args;

use super::{CmdResult, Workspace};

#[derive(Args)]
pub struct SummaryArgs {
    /// Viewed date; picks the week when no sprint is active
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,
    /// Directory to write the summary into
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Print the summary request as JSON instead of writing a file
    #[arg(long)]
    json: bool,
}

pub fn run(args: SummaryArgs, today: NaiveDate) -> CmdResult {
    let ws = Workspace::open(today).dispatch(Action::SetDate(args.date.unwrap_or(today)));
    let state = &ws.state;

    let window = state.summary_window()?;
    if !state.summary_enabled() {
        return Err(format!(
            "no reflections saved between {} and {}",
            window.start, window.end
        )
        .into());
    }

    let request = state.summary_request()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }
    tracing::debug!(
        kind = ?request.kind,
        days = window.len_days(),
        entries = request.entries.len(),
        "rendering summary"
    );
    super::save_artifact(&TextDocumentAdapter.render_summary(&request)?, &args.out)
}
