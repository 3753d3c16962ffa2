//! Error hierarchy for taskdeck.
//!
//! All errors are structured with typed variants for each failure mode.
//! Nothing in the library crates swallows an error: stores and the
//! selection engine surface these to the facade, which passes them to
//! callers unchanged. The CLI/TUI layer is responsible for turning
//! "nothing matched" and "too many matched" into distinct user guidance.

use std::path::PathBuf;

use thiserror::Error;

use crate::ids::TaskId;

/// Errors from task storage and selection operations.
#[derive(Debug, Error)]
pub enum DeckError {
    /// No task matches the given reference (id or name).
    #[error("task not found: {reference}")]
    NotFound {
        /// The id or name that was looked up.
        reference: String,
    },

    /// A name reference matched more than one task.
    #[error("multiple tasks named '{name}'; re-run with one of the listed ids")]
    AmbiguousName {
        /// The duplicated name.
        name: String,
        /// Ids of every task carrying that name.
        candidates: Vec<TaskId>,
    },

    /// The persisted file exists but cannot be parsed into the expected shape.
    #[error("corrupt tasks data in {}: {source}", .path.display())]
    CorruptData {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the persisted file failed.
    #[error("failed to access {}: {source}", .path.display())]
    Persistence {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A task definition failed validation (empty name or command).
    #[error("invalid task: {0}")]
    Validation(String),
}

impl DeckError {
    /// Create a not-found error for a reference.
    pub fn not_found(reference: impl Into<String>) -> Self {
        Self::NotFound {
            reference: reference.into(),
        }
    }

    /// Create an ambiguity error carrying the candidate ids.
    pub fn ambiguous(name: impl Into<String>, candidates: Vec<TaskId>) -> Self {
        Self::AmbiguousName {
            name: name.into(),
            candidates,
        }
    }

    /// Create a corrupt-data error for a file.
    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CorruptData {
            path: path.into(),
            source,
        }
    }

    /// Create a persistence error for a file.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

/// Result type for taskdeck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
