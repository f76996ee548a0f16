//! Export requests and the document adapter boundary.
//!
//! The core decides *what* goes into a document: one entry, or the entries
//! of a weekly or sprint window. An [`ExportAdapter`] decides how it looks.
//! [`TextDocumentAdapter`] is the built-in plain-text layout.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::cadence::{Cadence, PromptCategory};
use crate::dates::{format_iso, iso_date, DateWindow};
use crate::error::ExportError;
use crate::history::{Entry, History};
use crate::prompts::ThemeFilter;

const FOOTER: &str = "Generated with Allyship Companion — no data stored";

/// A rendered, ready-to-save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name.
    ///
    /// The content goes to a temporary sibling first and is renamed into
    /// place, so a failed export never leaves a partial file behind.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        let tmp = dir.join(format!(".{}.partial", self.file_name));
        let result = std::fs::write(&tmp, &self.bytes).and_then(|_| std::fs::rename(&tmp, &path));
        if let Err(source) = result {
            let _ = std::fs::remove_file(&tmp);
            return Err(ExportError::Write { path, source });
        }
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "exported");
        Ok(path)
    }
}

/// Which kind of period a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Weekly,
    Sprint,
}

/// A single reflection to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleEntryRequest {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub theme: ThemeFilter,
    #[serde(skip)]
    pub cadence: Option<Cadence>,
    pub prompt_text: String,
    pub body_text: String,
}

impl SingleEntryRequest {
    /// # Errors
    ///
    /// A blank body yields [`ExportError::EmptyBody`].
    pub fn from_entry(entry: &Entry) -> Result<Self, ExportError> {
        if entry.body_text.trim().is_empty() {
            return Err(ExportError::EmptyBody);
        }
        Ok(Self {
            date: entry.date,
            theme: entry.theme,
            cadence: entry.cadence,
            prompt_text: entry.prompt_text.clone(),
            body_text: entry.body_text.clone(),
        })
    }

    /// `{date}_{category}_{theme}_Reflection.{ext}` with spaces in the
    /// theme replaced by underscores.
    pub fn file_name(&self, extension: &str) -> String {
        let category = self
            .cadence
            .map(|c| c.prompt_category())
            .unwrap_or(PromptCategory::Daily);
        let theme = self.theme.as_str().split_whitespace().collect::<Vec<_>>().join("_");
        format!(
            "{}_{}_{}_Reflection.{}",
            format_iso(&self.date),
            category.as_str(),
            theme,
            extension
        )
    }
}

/// Entries of one window, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub kind: SummaryKind,
    #[serde(with = "iso_date")]
    pub window_start: NaiveDate,
    #[serde(with = "iso_date")]
    pub window_end: NaiveDate,
    pub theme: ThemeFilter,
    pub entries: Vec<Entry>,
}

impl SummaryRequest {
    /// Collect the entries of `window` from `history`.
    ///
    /// # Errors
    ///
    /// A window that ends before it starts yields [`ExportError::EmptyWindow`].
    pub fn new(
        kind: SummaryKind,
        window: DateWindow,
        theme: ThemeFilter,
        history: &History,
    ) -> Result<Self, ExportError> {
        if window.is_empty() {
            return Err(ExportError::EmptyWindow {
                start: format_iso(&window.start),
                end: format_iso(&window.end),
            });
        }
        Ok(Self {
            kind,
            window_start: window.start,
            window_end: window.end,
            theme,
            entries: history.window_query(&window).into_iter().cloned().collect(),
        })
    }

    /// `Allyship_Sprint_{start}_to_{end}.{ext}` or the weekly equivalent.
    pub fn file_name(&self, extension: &str) -> String {
        let label = match self.kind {
            SummaryKind::Weekly => "Weekly",
            SummaryKind::Sprint => "Sprint",
        };
        format!(
            "Allyship_{}_{}_to_{}.{}",
            label,
            format_iso(&self.window_start),
            format_iso(&self.window_end),
            extension
        )
    }
}

/// Anything that can be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRequest {
    Single(SingleEntryRequest),
    Summary(SummaryRequest),
}

/// Turns export requests into files.
pub trait ExportAdapter {
    fn render_entry(&self, request: &SingleEntryRequest) -> Result<ExportArtifact, ExportError>;

    fn render_summary(&self, request: &SummaryRequest) -> Result<ExportArtifact, ExportError>;

    fn render(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
        match request {
            ExportRequest::Single(r) => self.render_entry(r),
            ExportRequest::Summary(r) => self.render_summary(r),
        }
    }
}

/// Plain-text documents with the same content as the printable layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDocumentAdapter;

impl TextDocumentAdapter {
    pub const EXTENSION: &'static str = "txt";
    pub const MIME: &'static str = "text/plain;charset=utf-8";

    fn artifact(file_name: String, body: String) -> ExportArtifact {
        ExportArtifact {
            file_name,
            mime: Self::MIME,
            bytes: body.into_bytes(),
        }
    }
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "—"
    } else {
        text
    }
}

impl ExportAdapter for TextDocumentAdapter {
    fn render_entry(&self, request: &SingleEntryRequest) -> Result<ExportArtifact, ExportError> {
        let render = || -> Result<String, std::fmt::Error> {
            let mut out = String::new();
            writeln!(out, "Daily Reflection — Intentional Allyship")?;
            writeln!(out, "{}  •  Theme: {}", format_iso(&request.date), request.theme)?;
            writeln!(out)?;
            writeln!(out, "PROMPT")?;
            writeln!(out, "{}", request.prompt_text)?;
            writeln!(out)?;
            writeln!(out, "REFLECTION")?;
            writeln!(out, "{}", or_dash(&request.body_text))?;
            writeln!(out)?;
            writeln!(out, "{FOOTER}")?;
            Ok(out)
        };

        let out = render().map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(Self::artifact(request.file_name(Self::EXTENSION), out))
    }

    fn render_summary(&self, request: &SummaryRequest) -> Result<ExportArtifact, ExportError> {
        let render = || -> Result<String, std::fmt::Error> {
            let mut out = String::new();
            let count = request.entries.len();
            writeln!(out, "Reflection Summary — {}", request.theme.heading())?;
            writeln!(
                out,
                "Period: {} to {} • {} {}",
                format_iso(&request.window_start),
                format_iso(&request.window_end),
                count,
                if count == 1 { "entry" } else { "entries" }
            )?;
            writeln!(out)?;

            if request.entries.is_empty() {
                writeln!(out, "No entries found in this period on this device.")?;
            }
            for entry in &request.entries {
                writeln!(out, "{}  •  Theme: {}", format_iso(&entry.date), entry.theme)?;
                writeln!(out, "{}", entry.prompt_text)?;
                writeln!(out, "{}", or_dash(&entry.body_text))?;
                writeln!(out)?;
            }
            writeln!(out, "{FOOTER}")?;
            Ok(out)
        };

        let body = render().map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(Self::artifact(request.file_name(Self::EXTENSION), body))
    }
}
