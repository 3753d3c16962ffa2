//! Bounded run history.
//!
//! Every executed task appends an entry to `history.json` (newest last).
//! The log is capped at [`HISTORY_MAX_ENTRIES`]; older entries fall off
//! the front. The picker uses it to recommend tasks recently run from
//! the current working directory.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use taskdeck_core::constants::HISTORY_MAX_ENTRIES;
use taskdeck_core::errors::{DeckError, Result};
use taskdeck_core::ids::TaskId;

use crate::atomic;
use crate::paths::Config;

/// One recorded execution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Id of the task that ran.
    pub task_id: TaskId,
    /// Directory the palette was invoked from when the task ran.
    pub cwd: String,
    /// When the run happened.
    pub timestamp: DateTime<Utc>,
}

/// The persisted run log.
#[derive(Debug)]
pub struct RunHistory {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl RunHistory {
    /// Load the history from `config`. A missing or empty file is an
    /// empty history.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.history_path();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| DeckError::corrupt(&path, e))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(DeckError::persistence(&path, e)),
        };
        Ok(Self { path, entries })
    }

    /// An empty history that will persist to `config`'s history path.
    ///
    /// Used to degrade gracefully when the existing log is unreadable;
    /// the next recorded run replaces it.
    #[must_use]
    pub fn empty(config: &Config) -> Self {
        Self {
            path: config.history_path(),
            entries: Vec::new(),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Append a run record, enforce the cap, and persist.
    pub fn record(&mut self, task_id: &TaskId, cwd: &str) -> Result<()> {
        let previous = self.entries.clone();
        self.entries.push(HistoryEntry {
            task_id: task_id.clone(),
            cwd: cwd.to_string(),
            timestamp: Utc::now(),
        });
        if self.entries.len() > HISTORY_MAX_ENTRIES {
            let excess = self.entries.len() - HISTORY_MAX_ENTRIES;
            let _ = self.entries.drain(..excess);
        }
        if let Err(e) = self.save() {
            self.entries = previous;
            return Err(e);
        }
        debug!(task_id = %task_id, cwd, "recorded run");
        Ok(())
    }

    /// Distinct task ids most recently run from `cwd`, newest first.
    #[must_use]
    pub fn recent_task_ids_for_dir(&self, cwd: &str, limit: usize) -> Vec<TaskId> {
        let mut out: Vec<TaskId> = Vec::new();
        for entry in self.entries.iter().rev() {
            if entry.cwd != cwd || out.contains(&entry.task_id) {
                continue;
            }
            out.push(entry.task_id.clone());
            if out.len() == limit {
                break;
            }
        }
        out
    }

    fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.entries).map_err(|e| {
            DeckError::persistence(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        atomic::replace_file(&self.path, &bytes)
            .map_err(|e| DeckError::persistence(&self.path, e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
