//! Reflection prompts, themes, and the daily prompt selector.
//!
//! The prompt table is static data compiled into the binary. Selection is a
//! pure function of `(date, cadence, theme)`, so the same day always shows
//! the same prompt on every device and every run.

mod selector;
mod table;

pub use selector::{prompt_seed, select_prompt, select_prompt_by_name, PromptSelection};
pub use table::BUILTIN;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::cadence::PromptCategory;
use crate::error::ValidationError;

/// Topical tag used to narrow the prompt pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Belonging,
    Bias,
    Visibility,
    Inclusion,
    Advocacy,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Belonging,
        Theme::Bias,
        Theme::Visibility,
        Theme::Inclusion,
        Theme::Advocacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Belonging => "Belonging",
            Theme::Bias => "Bias",
            Theme::Visibility => "Visibility",
            Theme::Inclusion => "Inclusion",
            Theme::Advocacy => "Advocacy",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownTheme(s.to_string()))
    }
}

/// Theme selection: every prompt, or only prompts tagged with one theme.
///
/// Serialized as the bare theme name, with `"All"` for the unfiltered pool.
/// An empty string reads back as `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeFilter {
    #[default]
    All,
    Only(Theme),
}

impl ThemeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeFilter::All => "All",
            ThemeFilter::Only(theme) => theme.as_str(),
        }
    }

    /// Heading used on summary documents.
    pub fn heading(&self) -> &'static str {
        match self {
            ThemeFilter::All => "All Themes",
            ThemeFilter::Only(theme) => theme.as_str(),
        }
    }

    pub fn matches(&self, pair: &PromptPair) -> bool {
        match self {
            ThemeFilter::All => true,
            ThemeFilter::Only(theme) => pair.themes.contains(theme),
        }
    }

    /// Every selectable filter, `All` first.
    pub fn choices() -> impl Iterator<Item = ThemeFilter> {
        std::iter::once(ThemeFilter::All).chain(Theme::ALL.into_iter().map(ThemeFilter::Only))
    }
}

impl fmt::Display for ThemeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(ThemeFilter::All)
        } else {
            s.parse().map(ThemeFilter::Only)
        }
    }
}

impl From<Theme> for ThemeFilter {
    fn from(theme: Theme) -> Self {
        ThemeFilter::Only(theme)
    }
}

impl Serialize for ThemeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ThemeFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A reflection question paired with a suggested action.
///
/// An empty `themes` list means the pair only shows up under `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptPair {
    pub reflection: &'static str,
    pub action: &'static str,
    pub themes: &'static [Theme],
}

/// Per-category prompt pools.
///
/// Every pool is non-empty; [`PromptTable::new`] enforces that for custom
/// tables and the built-in table is checked by its tests.
#[derive(Debug, Clone, Copy)]
pub struct PromptTable {
    daily: &'static [PromptPair],
    few_days: &'static [PromptPair],
    week: &'static [PromptPair],
}

impl PromptTable {
    pub fn new(
        daily: &'static [PromptPair],
        few_days: &'static [PromptPair],
        week: &'static [PromptPair],
    ) -> Result<Self, ValidationError> {
        for (name, pool) in [("daily", daily), ("fewDays", few_days), ("week", week)] {
            if pool.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: name.to_string(),
                    message: "prompt pool must not be empty".to_string(),
                });
            }
        }
        Ok(Self {
            daily,
            few_days,
            week,
        })
    }

    /// The compiled-in prompt table.
    pub fn builtin() -> &'static PromptTable {
        &BUILTIN
    }

    pub fn pool(&self, category: PromptCategory) -> &'static [PromptPair] {
        match category {
            PromptCategory::Daily => self.daily,
            PromptCategory::FewDays => self.few_days,
            PromptCategory::Week => self.week,
        }
    }

    pub fn len(&self) -> usize {
        self.daily.len() + self.few_days.len() + self.week.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
