//! # Allyship Companion Core Library
//!
//! Core logic for a small, local-only journaling aid: show a reflection
//! prompt for the day, save a short written response, and export one
//! response or a week/sprint of them.
//!
//! ## Architecture
//!
//! - **Dates**: strict `YYYY-MM-DD` parsing and calendar-day arithmetic
//! - **Prompts**: static prompt table and a deterministic per-day selector
//! - **Cadence / Sprint**: reminder recurrence and 14-day sprint windows
//! - **History**: date-keyed saved entries with windowed queries
//! - **Storage**: named JSON blobs behind a key-value store, loaded fail-soft
//! - **Session**: a pure reducer over user actions
//! - **Export**: `.ics` calendars and document requests for an export adapter
//!
//! Nothing here reads the clock implicitly; "today" is always an argument.

pub mod cadence;
pub mod calendar;
pub mod dates;
pub mod error;
pub mod export;
pub mod history;
pub mod prompts;
pub mod session;
pub mod sprint;
pub mod storage;

pub use cadence::{generate_cadence_occurrences, Cadence, CadenceConfig, CadenceOccurrences, PromptCategory};
pub use calendar::{cadence_calendar, sprint_calendar, Calendar, CalendarEvent};
pub use dates::{add_days, days_between, format_iso, parse_iso, week_end, week_start_monday, DateWindow};
pub use error::{CoreError, DateError, ExportError, StoreError, ValidationError};
pub use export::{
    ExportAdapter, ExportArtifact, ExportRequest, SingleEntryRequest, SummaryKind, SummaryRequest,
    TextDocumentAdapter,
};
pub use history::{count_words, Entry, History, MAX_WORDS};
pub use prompts::{select_prompt, PromptPair, PromptSelection, PromptTable, Theme, ThemeFilter};
pub use session::{apply_action, Action, SessionState};
pub use sprint::{sprint_effective_window, sprint_progress, SprintProgress, SprintWindow, SPRINT_DAYS};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Prefs};
