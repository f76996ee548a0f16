use allyship_core::storage::{save_prefs, update_pref};
use allyship_core::{CoreError, Prefs};
use chrono::NaiveDate;
use clap::Subcommand;

use super::{CmdResult, Workspace};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a preference value
    Get {
        /// Preference key (e.g. "theme", "fontSize")
        key: String,
    },
    /// Set a preference value
    Set {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },
    /// List all preferences
    List {
        /// Print the stored JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset preferences to defaults
    Reset,
}

pub fn run(action: ConfigAction, today: NaiveDate) -> CmdResult {
    let mut ws = Workspace::open(today);

    match action {
        ConfigAction::Get { key } => match ws.state.prefs.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => match update_pref(ws.store_mut(), &key, &value) {
            Ok(_) => println!("ok"),
            Err(CoreError::Store(e)) => {
                tracing::warn!("preference not persisted this session: {e}");
                println!("ok");
            }
            Err(e) => return Err(e.into()),
        },
        ConfigAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ws.state.prefs)?);
            } else {
                for (key, value) in ws.state.prefs.entries() {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigAction::Reset => {
            if let Err(e) = save_prefs(ws.store_mut(), &Prefs::default()) {
                tracing::warn!("preferences not persisted this session: {e}");
            }
            println!("preferences reset to defaults");
        }
    }
    Ok(())
}
