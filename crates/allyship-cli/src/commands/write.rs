use std::io::Read;
use std::path::PathBuf;

use allyship_core::{Action, MAX_WORDS};
use chrono::NaiveDate;
use clap::Args;

use super::{CmdResult, Workspace};

#[derive(Args)]
pub struct WriteArgs {
    /// Reflection text; read from stdin when omitted
    text: Option<String>,
    /// Date the reflection is for (defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<NaiveDate>,
    /// Also export the saved reflection into this directory
    #[arg(long)]
    export: Option<PathBuf>,
}

pub fn run(args: WriteArgs, today: NaiveDate) -> CmdResult {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut ws = Workspace::open(today);
    ws = ws.dispatch(Action::SetDate(args.date.unwrap_or(today)));
    ws = ws.dispatch(Action::SetBody(text));
    if !ws.state.can_save() {
        return Err(format!(
            "reflection must be 1 to {MAX_WORDS} words (got {})",
            ws.state.word_count()
        )
        .into());
    }
    ws = ws.dispatch(Action::Save);
    println!("saved {} ({} words)", ws.state.viewing, ws.state.word_count());

    if let Some(dir) = args.export {
        super::export_viewed_entry(&ws.state, &dir)?;
    }
    Ok(())
}
