//! Core error types for allyship-core.
//!
//! Pure computation errors (bad dates, unknown cadence names) propagate to
//! the caller. Store errors are recovered at the boundary by the typed
//! loaders in [`crate::storage`]. Export errors are returned to whoever
//! requested the artifact.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for allyship-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed calendar date input
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Persistent store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Invalid calendar date input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input does not have the `YYYY-MM-DD` shape
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    Malformed { input: String },

    /// Input has the right shape but names a day that does not exist
    #[error("Invalid date '{input}': no such calendar day")]
    Impossible { input: String },

    /// Arithmetic left the representable calendar range
    #[error("Date arithmetic out of range: {input} {offset:+} days")]
    OutOfRange { input: String, offset: i64 },
}

/// Errors talking to the persistent key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a key
    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },

    /// Failed to write a key
    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    /// Stored blob could not be decoded
    #[error("Failed to parse stored '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to access the data directory
    #[error("Failed to access data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Errors producing a downloadable artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Self-paced cadence has no recurrence to export
    #[error("Self-paced cadence has no calendar to export")]
    SelfPacedCadence,

    /// Requested window ends before it starts
    #[error("Empty export window: {start} to {end}")]
    EmptyWindow { start: String, end: String },

    /// Nothing to export for a single-entry request
    #[error("Reflection body is empty")]
    EmptyBody,

    /// Document rendering failed
    #[error("Failed to render document: {0}")]
    Render(String),

    /// Writing the artifact failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown cadence name
    #[error("Unknown cadence '{0}' (expected daily, 3x, weekly or self)")]
    UnknownCadence(String),

    /// Unknown theme name
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
