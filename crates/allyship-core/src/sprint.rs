//! Fixed-length reflection sprints.
//!
//! A sprint is a run of consecutive days starting on a chosen date. "Today"
//! is always passed in by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{day_delta, format_iso, iso_date, shift_days, DateWindow};
use crate::error::DateError;

/// Default sprint length in days.
pub const SPRINT_DAYS: u32 = 14;

/// A sprint anchored at `start_date`.
///
/// Serialized as `{active, startDate, days}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintWindow {
    pub active: bool,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    /// Read through [`SprintWindow::length`], which clamps it to one day.
    #[serde(rename = "days")]
    pub(crate) length_days: u32,
}

/// Where today falls in a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintProgress {
    pub day_number: u32,
    pub is_over: bool,
}

impl SprintWindow {
    /// An active sprint of [`SPRINT_DAYS`] days.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            active: true,
            start_date,
            length_days: SPRINT_DAYS,
        }
    }

    /// Sprint length in days, at least one.
    pub fn length(&self) -> u32 {
        self.length_days.max(1)
    }

    /// Last day of the sprint: `start + length - 1`.
    pub fn end_date(&self) -> Result<NaiveDate, DateError> {
        shift_days(self.start_date, i64::from(self.length()) - 1)
    }

    /// Day number shown for `date`, clamped to `1..=length`.
    pub fn day_number_on(&self, date: NaiveDate) -> u32 {
        let length = self.length();
        let day = (day_delta(self.start_date, date) + 1).clamp(1, i64::from(length));
        // Clamped into 1..=length, which came from a u32.
        u32::try_from(day).unwrap_or(length)
    }

    pub fn progress(&self, today: NaiveDate) -> SprintProgress {
        sprint_progress(self, today)
    }

    pub fn effective_window(&self, today: NaiveDate) -> Result<DateWindow, DateError> {
        sprint_effective_window(self, today)
    }

    /// Every day of the sprint in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..i64::from(self.length())).map_while(move |i| shift_days(self.start_date, i).ok())
    }

    /// Status line such as `Day 3 of 14 (started 2025-03-03)`.
    pub fn banner(&self, viewing: NaiveDate) -> String {
        format!(
            "Day {} of {} (started {})",
            self.day_number_on(viewing),
            self.length(),
            format_iso(&self.start_date)
        )
    }

    /// Same sprint, no longer active.
    pub fn ended(self) -> Self {
        Self {
            active: false,
            ..self
        }
    }
}

/// Day number and completion for `today`.
///
/// The sprint is over once `today` is `length` or more days past the start;
/// an over sprint reports its final day. A sprint that has not started yet
/// reports day 1.
pub fn sprint_progress(window: &SprintWindow, today: NaiveDate) -> SprintProgress {
    let length = window.length();
    let elapsed = day_delta(window.start_date, today);
    let is_over = elapsed >= i64::from(length);
    let day_number = if is_over {
        length
    } else {
        window.day_number_on(today)
    };
    SprintProgress { day_number, is_over }
}

/// The to-date window used for mid-sprint summaries.
///
/// Runs from the start to the earlier of the sprint's last day and
/// `today`. For a sprint starting after `today` the end precedes the start
/// and the window is empty.
pub fn sprint_effective_window(window: &SprintWindow, today: NaiveDate) -> Result<DateWindow, DateError> {
    let end = window.end_date()?.min(today);
    let effective = DateWindow::new(window.start_date, end);
    tracing::debug!(
        start = %effective.start,
        end = %effective.end,
        empty = effective.is_empty(),
        "sprint effective window"
    );
    Ok(effective)
}
