//! Session state and the actions that change it.
//!
//! [`apply_action`] is a pure reducer: it takes the current state and one
//! user action and returns the next state. Rendering layers read the derived
//! views on [`SessionState`]; persistence is a separate step driven by
//! [`Action::touched_keys`].

use chrono::NaiveDate;

use crate::cadence::Cadence;
use crate::dates::DateWindow;
use crate::error::{DateError, ExportError, StoreError};
use crate::export::{SingleEntryRequest, SummaryKind, SummaryRequest};
use crate::history::{self, Entry, History};
use crate::prompts::{select_prompt, PromptSelection, PromptTable, ThemeFilter};
use crate::sprint::SprintWindow;
use crate::storage::{self, Contrast, FontScale, KeyValueStore, Prefs};

/// Everything one session knows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// The real current date.
    pub today: NaiveDate,
    /// The date being viewed and written for.
    pub viewing: NaiveDate,
    pub prefs: Prefs,
    pub draft: String,
    pub sprint: Option<SprintWindow>,
    pub history: History,
}

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetDate(NaiveDate),
    /// The clock moved to a new day.
    SetToday(NaiveDate),
    SetTheme(ThemeFilter),
    SetCadence(Cadence),
    SetCadenceStart(Option<NaiveDate>),
    SetBody(String),
    SetContrast(Contrast),
    SetFontSize(f64),
    SetSpecialFont(bool),
    /// Save the draft for the viewed date.
    Save,
    StartSprint(NaiveDate),
    EndSprint,
}

impl Action {
    /// Store keys whose blobs may need rewriting after this action.
    pub fn touched_keys(&self) -> &'static [&'static str] {
        match self {
            Action::SetTheme(_)
            | Action::SetCadence(_)
            | Action::SetCadenceStart(_)
            | Action::SetContrast(_)
            | Action::SetFontSize(_)
            | Action::SetSpecialFont(_) => &[storage::PREFS_KEY],
            Action::Save => &[storage::HISTORY_KEY],
            Action::StartSprint(_) | Action::EndSprint => &[storage::SPRINT_KEY],
            Action::SetDate(_) | Action::SetToday(_) | Action::SetBody(_) => &[],
        }
    }
}

/// Apply `action` to `state`.
pub fn apply_action(state: SessionState, action: Action) -> SessionState {
    let mut next = state;
    match action {
        Action::SetDate(date) => next.viewing = date,
        Action::SetToday(date) => next.today = date,
        Action::SetTheme(theme) => next.prefs.theme = theme,
        Action::SetCadence(cadence) => next.prefs.cadence = cadence,
        Action::SetCadenceStart(start) => next.prefs.cadence_start = start,
        Action::SetBody(body) => next.draft = body,
        Action::SetContrast(contrast) => next.prefs.contrast = contrast,
        Action::SetFontSize(size) => next.prefs.font_size = FontScale::new(size),
        Action::SetSpecialFont(on) => next.prefs.use_special_font = on,
        Action::Save => match next.draft_entry(PromptTable::builtin()) {
            Some(entry) => next.history = next.history.upsert(entry),
            None => tracing::debug!(
                words = history::count_words(&next.draft),
                "save ignored: draft is empty or too long"
            ),
        },
        Action::StartSprint(start) => {
            tracing::info!(start = %start, "sprint started");
            next.sprint = Some(SprintWindow::new(start));
        }
        Action::EndSprint => {
            if let Some(sprint) = next.sprint.take() {
                tracing::info!(start = %sprint.start_date, "sprint ended");
                next.sprint = Some(sprint.ended());
            }
        }
    }
    next
}

impl SessionState {
    /// A fresh session with default preferences viewing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            viewing: today,
            prefs: Prefs::default(),
            draft: String::new(),
            sprint: None,
            history: History::new(),
        }
    }

    /// Restore a session from the store. Every blob fails soft.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, today: NaiveDate) -> Self {
        Self {
            prefs: storage::load_prefs_or_default(store),
            sprint: storage::load_sprint_or_default(store, today),
            history: storage::load_history_or_default(store),
            ..Self::new(today)
        }
    }

    /// Write the blobs `action` touched.
    ///
    /// Returns the first failure; callers that treat persistence as best
    /// effort use [`SessionState::persist_soft`].
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S, action: &Action) -> Result<(), StoreError> {
        for key in action.touched_keys() {
            match *key {
                storage::PREFS_KEY => storage::save_prefs(store, &self.prefs)?,
                storage::HISTORY_KEY => storage::save_history(store, &self.history)?,
                storage::SPRINT_KEY => {
                    if let Some(sprint) = &self.sprint {
                        storage::save_sprint(store, sprint)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// [`SessionState::persist`], logging instead of failing.
    pub fn persist_soft<S: KeyValueStore + ?Sized>(&self, store: &mut S, action: &Action) {
        if let Err(e) = self.persist(store, action) {
            tracing::warn!("state not persisted this session: {e}");
        }
    }

    /// The prompt shown for the viewed date.
    pub fn prompt(&self, table: &PromptTable) -> PromptSelection {
        select_prompt(table, self.viewing, self.prefs.cadence, self.prefs.theme)
    }

    pub fn word_count(&self) -> usize {
        history::count_words(&self.draft)
    }

    pub fn can_save(&self) -> bool {
        history::can_save(&self.draft)
    }

    /// The entry a save would store, if the draft is saveable.
    pub fn draft_entry(&self, table: &PromptTable) -> Option<Entry> {
        if !self.can_save() {
            return None;
        }
        let selection = self.prompt(table);
        Some(Entry::from_selection(
            self.viewing,
            self.prefs.cadence,
            self.prefs.theme,
            &selection,
            self.draft.clone(),
        ))
    }

    /// The saved entry for the viewed date as an export request.
    pub fn entry_request(&self) -> Option<Result<SingleEntryRequest, ExportError>> {
        self.history.get(self.viewing).map(SingleEntryRequest::from_entry)
    }

    pub fn active_sprint(&self) -> Option<&SprintWindow> {
        self.sprint.as_ref().filter(|s| s.active)
    }

    pub fn summary_kind(&self) -> SummaryKind {
        if self.active_sprint().is_some() {
            SummaryKind::Sprint
        } else {
            SummaryKind::Weekly
        }
    }

    /// The window a summary covers: the sprint so far while a sprint is
    /// active, otherwise Monday to Sunday of the viewed week.
    pub fn summary_window(&self) -> Result<DateWindow, DateError> {
        match self.active_sprint() {
            Some(sprint) => sprint.effective_window(self.today),
            None => Ok(DateWindow::week_of(self.viewing)),
        }
    }

    /// Whether the summary download is available.
    pub fn summary_enabled(&self) -> bool {
        self.summary_window()
            .map(|w| self.history.has_any(&w))
            .unwrap_or(false)
    }

    pub fn summary_request(&self) -> crate::error::Result<SummaryRequest> {
        let window = self.summary_window()?;
        Ok(SummaryRequest::new(
            self.summary_kind(),
            window,
            self.prefs.theme,
            &self.history,
        )?)
    }

    /// Sprint status line for the viewed date, while a sprint is active.
    pub fn sprint_banner(&self) -> Option<String> {
        self.active_sprint().map(|s| s.banner(self.viewing))
    }
}
