pub mod cadence;
pub mod completions;
pub mod config;
pub mod history;
pub mod prompt;
pub mod sprint;
pub mod summary;
pub mod write;

use std::path::Path;

use allyship_core::dates::parse_iso;
use allyship_core::{
    apply_action, Action, ExportAdapter, ExportArtifact, FileStore, KeyValueStore, MemoryStore,
    SessionState, TextDocumentAdapter,
};
use chrono::NaiveDate;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_iso(s).map_err(|e| e.to_string())
}

/// A session bound to the on-disk store.
///
/// When the data directory cannot be used the session runs on an in-memory
/// store: defaults are loaded and nothing outlives the process.
pub struct Workspace {
    store: Box<dyn KeyValueStore>,
    pub state: SessionState,
}

impl Workspace {
    pub fn open(today: NaiveDate) -> Self {
        let store: Box<dyn KeyValueStore> = match FileStore::open() {
            Ok(store) => {
                tracing::debug!(dir = %store.dir().display(), "opened store");
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults for this session");
                Box::new(MemoryStore::new())
            }
        };
        let state = SessionState::load(store.as_ref(), today);
        Self { store, state }
    }

    /// Apply `action` and write whatever it touched, logging a failed write.
    pub fn dispatch(mut self, action: Action) -> Self {
        self.state = apply_action(self.state, action.clone());
        self.state.persist_soft(self.store.as_mut(), &action);
        self
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

/// Export the reflection saved for the viewed date into `dir`.
pub fn export_viewed_entry(state: &SessionState, dir: &Path) -> CmdResult {
    let Some(request) = state.entry_request() else {
        return Err(format!("no reflection saved for {}", state.viewing).into());
    };
    save_artifact(&TextDocumentAdapter.render_entry(&request?)?, dir)
}

/// Write an artifact into `dir` and report where it went.
pub fn save_artifact(artifact: &ExportArtifact, dir: &Path) -> CmdResult {
    let path = artifact.write_to(dir)?;
    println!("{}", path.display());
    Ok(())
}
