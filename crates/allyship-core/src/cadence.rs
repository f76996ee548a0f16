//! Reminder cadences and their recurring dates.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dates::{self, iso_date};
use crate::error::ValidationError;

const MONDAYS: &[Weekday] = &[Weekday::Mon];
const MON_WED_FRI: &[Weekday] = &[Weekday::Mon, Weekday::Wed, Weekday::Fri];

/// How often the user wants to be nudged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cadence {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "3x")]
    ThreeTimesWeekly,
    #[serde(rename = "weekly")]
    Weekly,
    /// No recurring reminders
    #[default]
    #[serde(rename = "self")]
    SelfPaced,
}

/// Prompt pool a cadence draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptCategory {
    Daily,
    FewDays,
    Week,
}

impl Cadence {
    pub const ALL: [Cadence; 4] = [
        Cadence::Daily,
        Cadence::ThreeTimesWeekly,
        Cadence::Weekly,
        Cadence::SelfPaced,
    ];

    /// Stable wire name, also part of the prompt seed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::ThreeTimesWeekly => "3x",
            Cadence::Weekly => "weekly",
            Cadence::SelfPaced => "self",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cadence::Daily => "Daily",
            Cadence::ThreeTimesWeekly => "3× per week",
            Cadence::Weekly => "Weekly",
            Cadence::SelfPaced => "Only when I choose",
        }
    }

    /// Self-paced and daily both draw from the daily pool.
    pub fn prompt_category(&self) -> PromptCategory {
        match self {
            Cadence::Weekly => PromptCategory::Week,
            Cadence::ThreeTimesWeekly => PromptCategory::FewDays,
            Cadence::Daily | Cadence::SelfPaced => PromptCategory::Daily,
        }
    }

    /// Weekdays a weekly-style cadence lands on; `None` for daily and self-paced.
    fn weekdays(&self) -> Option<&'static [Weekday]> {
        match self {
            Cadence::Weekly => Some(MONDAYS),
            Cadence::ThreeTimesWeekly => Some(MON_WED_FRI),
            Cadence::Daily | Cadence::SelfPaced => None,
        }
    }

    /// iCalendar recurrence rule body, without the `RRULE:` prefix.
    pub fn recurrence_rule(&self) -> Option<&'static str> {
        match self {
            Cadence::Daily => Some("FREQ=DAILY"),
            Cadence::Weekly => Some("FREQ=WEEKLY;BYDAY=MO"),
            Cadence::ThreeTimesWeekly => Some("FREQ=WEEKLY;BYDAY=MO,WE,FR"),
            Cadence::SelfPaced => None,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Cadence::SelfPaced)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "daily" => Ok(Cadence::Daily),
            "3x" | "three-times-weekly" => Ok(Cadence::ThreeTimesWeekly),
            "weekly" => Ok(Cadence::Weekly),
            "self" | "self-paced" => Ok(Cadence::SelfPaced),
            other => Err(ValidationError::UnknownCadence(other.to_string())),
        }
    }
}

impl PromptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptCategory::Daily => "daily",
            PromptCategory::FewDays => "fewDays",
            PromptCategory::Week => "week",
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cadence anchored at a start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadenceConfig {
    pub cadence: Cadence,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
}

impl CadenceConfig {
    pub fn new(cadence: Cadence, start_date: NaiveDate) -> Self {
        Self { cadence, start_date }
    }

    /// Reminder dates from the start date up to and including `horizon`.
    pub fn occurrences(&self, horizon: NaiveDate) -> CadenceOccurrences {
        generate_cadence_occurrences(self, horizon)
    }
}

/// Lazily yields the reminder dates of a cadence.
///
/// The sequence is bounded by its horizon. Cloning it restarts from the
/// clone's current position, so a fresh iterator can always be rebuilt from
/// the same [`CadenceConfig`].
#[derive(Debug, Clone)]
pub struct CadenceOccurrences {
    cadence: Cadence,
    cursor: Option<NaiveDate>,
    horizon: NaiveDate,
}

impl Iterator for CadenceOccurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let pick = match self.cadence.weekdays() {
            _ if !self.cadence.is_recurring() => None,
            None => self.cursor,
            Some(days) => {
                let mut candidate = self.cursor;
                // A matching weekday is always within the next seven days.
                for _ in 0..7 {
                    match candidate {
                        Some(d) if days.contains(&d.weekday()) => break,
                        Some(d) => candidate = d.succ_opt(),
                        None => break,
                    }
                }
                candidate
            }
        };

        match pick {
            Some(day) if day <= self.horizon => {
                self.cursor = day.succ_opt();
                Some(day)
            }
            _ => {
                self.cursor = None;
                None
            }
        }
    }
}

/// Recurring reminder dates for `config`, bounded by `horizon` (inclusive).
///
/// Daily yields every date, weekly every Monday, three-times-weekly every
/// Monday, Wednesday and Friday, all on or after the start date. Self-paced
/// yields nothing.
pub fn generate_cadence_occurrences(config: &CadenceConfig, horizon: NaiveDate) -> CadenceOccurrences {
    CadenceOccurrences {
        cadence: config.cadence,
        cursor: Some(config.start_date),
        horizon,
    }
}

/// Next reminder on or after `from`, if the cadence recurs at all.
pub fn next_occurrence(cadence: Cadence, from: NaiveDate) -> Option<NaiveDate> {
    let horizon = dates::shift_days(from, 6).ok()?;
    CadenceConfig::new(cadence, from).occurrences(horizon).next()
}
