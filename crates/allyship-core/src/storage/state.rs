//! Typed access to the persisted blobs.
//!
//! Each `load_*` returns the store's error so callers can see it; the
//! `load_*_or_default` variants apply the fail-soft policy and log what was
//! discarded. Saving is left to the caller to retry or ignore.

use chrono::NaiveDate;
use serde::Deserialize;

use super::{KeyValueStore, Prefs};
use crate::dates::parse_iso;
use crate::error::StoreError;
use crate::history::History;
use crate::sprint::{SprintWindow, SPRINT_DAYS};

pub const PREFS_KEY: &str = "prefs";
pub const SPRINT_KEY: &str = "sprint";
pub const HISTORY_KEY: &str = "history";

/// Load preferences; `None` when nothing has been stored yet.
pub fn load_prefs<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Prefs>, StoreError> {
    let Some(raw) = store.get(PREFS_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            key: PREFS_KEY.to_string(),
            source,
        })
}

pub fn load_prefs_or_default<S: KeyValueStore + ?Sized>(store: &S) -> Prefs {
    match load_prefs(store) {
        Ok(prefs) => prefs.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("using default preferences: {e}");
            Prefs::default()
        }
    }
}

pub fn save_prefs<S: KeyValueStore + ?Sized>(store: &mut S, prefs: &Prefs) -> Result<(), StoreError> {
    let raw = serde_json::to_string(prefs).map_err(|e| StoreError::Write {
        key: PREFS_KEY.to_string(),
        message: e.to_string(),
    })?;
    store.set(PREFS_KEY, &raw)
}

/// Set one preference by key and save the result.
///
/// Starts from the stored preferences, or the defaults when they cannot be
/// read. A rejected value leaves the store untouched.
pub fn update_pref<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: &str,
) -> crate::error::Result<Prefs> {
    let mut prefs = load_prefs_or_default(store);
    prefs.set(key, value)?;
    save_prefs(store, &prefs)?;
    tracing::info!(key, value, "preference updated");
    Ok(prefs)
}

/// Stored sprint blob. Ending a sprint may leave only `{active: false}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSprint {
    #[serde(default)]
    active: bool,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    days: Option<u32>,
}

/// Load the sprint, if one was ever started.
///
/// An active blob without a usable start date starts on `today`. An
/// inactive blob without a start date loads as `None`.
pub fn load_sprint<S: KeyValueStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> Result<Option<SprintWindow>, StoreError> {
    let Some(raw) = store.get(SPRINT_KEY)? else {
        return Ok(None);
    };
    let stored: Option<StoredSprint> =
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            key: SPRINT_KEY.to_string(),
            source,
        })?;
    let Some(stored) = stored else {
        return Ok(None);
    };

    let start = stored.start_date.as_deref().and_then(|s| parse_iso(s).ok());
    let length_days = stored.days.filter(|d| *d > 0).unwrap_or(SPRINT_DAYS);
    let window = match (stored.active, start) {
        (true, start) => Some(SprintWindow {
            active: true,
            start_date: start.unwrap_or(today),
            length_days,
        }),
        (false, Some(start_date)) => Some(SprintWindow {
            active: false,
            start_date,
            length_days,
        }),
        (false, None) => None,
    };
    Ok(window)
}

pub fn load_sprint_or_default<S: KeyValueStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> Option<SprintWindow> {
    load_sprint(store, today).unwrap_or_else(|e| {
        tracing::warn!("ignoring stored sprint: {e}");
        None
    })
}

pub fn save_sprint<S: KeyValueStore + ?Sized>(
    store: &mut S,
    sprint: &SprintWindow,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(sprint).map_err(|e| StoreError::Write {
        key: SPRINT_KEY.to_string(),
        message: e.to_string(),
    })?;
    store.set(SPRINT_KEY, &raw)
}

/// Load the saved history. Unparsable content reads as empty; only a
/// failing store is reported.
pub fn load_history<S: KeyValueStore + ?Sized>(store: &S) -> Result<History, StoreError> {
    Ok(store
        .get(HISTORY_KEY)?
        .map(|raw| History::from_json_soft(&raw))
        .unwrap_or_default())
}

pub fn load_history_or_default<S: KeyValueStore + ?Sized>(store: &S) -> History {
    load_history(store).unwrap_or_else(|e| {
        tracing::warn!("starting with empty history: {e}");
        History::new()
    })
}

pub fn save_history<S: KeyValueStore + ?Sized>(store: &mut S, history: &History) -> Result<(), StoreError> {
    let raw = history.to_json().map_err(|e| StoreError::Write {
        key: HISTORY_KEY.to_string(),
        message: e.to_string(),
    })?;
    store.set(HISTORY_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadence::Cadence;
    use crate::error::CoreError;
    use crate::history::Entry;
    use crate::prompts::ThemeFilter;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Read {
                key: key.to_string(),
                message: "storage disabled".to_string(),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }
    }

    fn d(s: &str) -> NaiveDate {
        parse_iso(s).unwrap()
    }

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_prefs(&store).unwrap(), None);
        assert_eq!(load_prefs_or_default(&store), Prefs::default());
        assert_eq!(load_sprint(&store, d("2025-03-03")).unwrap(), None);
        assert!(load_history(&store).unwrap().is_empty());
    }

    #[test]
    fn broken_store_fails_soft() {
        let mut store = BrokenStore;
        assert!(load_prefs(&store).is_err());
        assert_eq!(load_prefs_or_default(&store), Prefs::default());
        assert_eq!(load_sprint_or_default(&store, d("2025-03-03")), None);
        assert!(load_history_or_default(&store).is_empty());
        assert!(save_history(&mut store, &History::new()).is_err());
    }

    #[test]
    fn garbage_prefs_is_a_parse_error_with_soft_default() {
        let mut store = MemoryStore::new();
        store.set(PREFS_KEY, "{{{").unwrap();
        assert!(matches!(load_prefs(&store), Err(StoreError::Parse { .. })));
        assert_eq!(load_prefs_or_default(&store), Prefs::default());
    }

    #[test]
    fn non_array_history_is_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"{"date":"2025-03-03"}"#).unwrap();
        assert!(load_history(&store).unwrap().is_empty());
    }

    #[test]
    fn sprint_blob_variants() {
        let today = d("2025-03-10");
        let mut store = MemoryStore::new();

        store.set(SPRINT_KEY, r#"{"active":true,"startDate":"2025-03-03","days":14}"#).unwrap();
        let sprint = load_sprint(&store, today).unwrap().unwrap();
        assert!(sprint.active);
        assert_eq!(sprint.start_date, d("2025-03-03"));

        store.set(SPRINT_KEY, r#"{"active":true}"#).unwrap();
        let sprint = load_sprint(&store, today).unwrap().unwrap();
        assert_eq!(sprint.start_date, today);
        assert_eq!(sprint.length_days, SPRINT_DAYS);

        store.set(SPRINT_KEY, r#"{"active":false}"#).unwrap();
        assert_eq!(load_sprint(&store, today).unwrap(), None);

        store.set(SPRINT_KEY, "null").unwrap();
        assert_eq!(load_sprint(&store, today).unwrap(), None);
    }

    #[test]
    fn update_pref_validates_then_saves() {
        let mut store = MemoryStore::new();
        let prefs = update_pref(&mut store, "theme", "Advocacy").unwrap();
        assert_eq!(load_prefs(&store).unwrap(), Some(prefs));

        assert!(matches!(
            update_pref(&mut store, "cadence", "monthly"),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(load_prefs_or_default(&store).cadence, Cadence::SelfPaced);

        assert!(matches!(
            update_pref(&mut BrokenStore, "cadence", "daily"),
            Err(CoreError::Store(StoreError::Write { .. }))
        ));
    }

    #[test]
    fn save_and_reload_round_trip() {
        let mut store = MemoryStore::new();
        let mut prefs = Prefs::default();
        prefs.set("cadence", "weekly").unwrap();
        save_prefs(&mut store, &prefs).unwrap();
        assert_eq!(load_prefs(&store).unwrap(), Some(prefs));

        let sprint = SprintWindow::new(d("2025-03-03"));
        save_sprint(&mut store, &sprint).unwrap();
        assert_eq!(load_sprint(&store, d("2025-03-05")).unwrap(), Some(sprint));

        let history = History::new().upsert(Entry::new(
            d("2025-03-03"),
            ThemeFilter::All,
            Some(Cadence::Weekly),
            "prompt",
            None,
            "body text",
        ));
        save_history(&mut store, &history).unwrap();
        assert_eq!(load_history(&store).unwrap(), history);
    }
}
