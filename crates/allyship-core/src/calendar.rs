//! iCalendar export for reminder cadences and sprints.
//!
//! Output is a minimal `VCALENDAR` of all-day events with CRLF line endings,
//! which standard calendar apps import directly.

use chrono::NaiveDate;

use crate::cadence::Cadence;
use crate::error::ExportError;
use crate::export::ExportArtifact;
use crate::sprint::SprintWindow;

const PRODID: &str = "-//Allyship Companion//EN";
pub const CADENCE_FILE_NAME: &str = "allyship-cadence.ics";
pub const CALENDAR_MIME: &str = "text/calendar;charset=utf-8";

/// One all-day event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub date: NaiveDate,
    pub summary: String,
    /// Recurrence rule body, e.g. `FREQ=WEEKLY;BYDAY=MO`.
    pub rrule: Option<&'static str>,
}

/// A set of events rendered as one `.ics` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    pub events: Vec<CalendarEvent>,
}

fn compact(date: &NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Escape TEXT values per RFC 5545.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

impl Calendar {
    /// Render the document. Lines are CRLF-separated with no trailing break.
    pub fn to_ics(&self) -> String {
        let mut lines: Vec<String> = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{PRODID}"),
            "CALSCALE:GREGORIAN".to_string(),
        ];
        for event in &self.events {
            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!("UID:{}", event.uid));
            lines.push(format!("DTSTART;VALUE=DATE:{}", compact(&event.date)));
            lines.push(format!("SUMMARY:{}", escape_text(&event.summary)));
            if let Some(rule) = event.rrule {
                lines.push(format!("RRULE:{rule}"));
            }
            lines.push("END:VEVENT".to_string());
        }
        lines.push("END:VCALENDAR".to_string());
        lines.join("\r\n")
    }

    pub fn into_artifact(self, file_name: impl Into<String>) -> ExportArtifact {
        ExportArtifact {
            file_name: file_name.into(),
            mime: CALENDAR_MIME,
            bytes: self.to_ics().into_bytes(),
        }
    }
}

/// A single recurring event for `cadence`, starting on `start`.
///
/// # Errors
///
/// Self-paced cadence has no recurrence and yields
/// [`ExportError::SelfPacedCadence`].
pub fn cadence_calendar(cadence: Cadence, start: NaiveDate) -> Result<Calendar, ExportError> {
    let rrule = cadence.recurrence_rule().ok_or(ExportError::SelfPacedCadence)?;
    let event = CalendarEvent {
        uid: format!("ac-{}-{}@allyship", compact(&start), cadence.as_str()),
        date: start,
        summary: format!("Allyship reflection ({})", cadence.as_str()),
        rrule: Some(rrule),
    };
    Ok(Calendar {
        events: vec![event],
    })
}

/// One event per sprint day, numbered from 1.
pub fn sprint_calendar(sprint: &SprintWindow) -> Calendar {
    let events = sprint
        .days()
        .enumerate()
        .map(|(i, day)| CalendarEvent {
            uid: format!("sprint-{}-{i}@allyship", compact(&day)),
            date: day,
            summary: format!(
                "Allyship {}-day sprint - Day {}",
                sprint.length(),
                i + 1
            ),
            rrule: None,
        })
        .collect();
    Calendar { events }
}

/// File name for a sprint calendar, e.g. `allyship-sprint-14d.ics`.
pub fn sprint_file_name(sprint: &SprintWindow) -> String {
    format!("allyship-sprint-{}d.ics", sprint.length())
}
