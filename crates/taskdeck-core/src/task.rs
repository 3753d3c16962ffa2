//! The task record and its create/update parameter structs.
//!
//! A [`Task`] is one stored command definition. Defaulting rules live at
//! the serde boundary so the rest of the codebase never deals with
//! missing fields: absent `id` deserializes to an unassigned sentinel
//! (backfilled by the store), absent `cwd` falls back to the user's home
//! directory marker, absent `description`/`last_run` are empty/`None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CWD;
use crate::errors::{DeckError, Result};
use crate::ids::TaskId;

fn unassigned_id() -> TaskId {
    TaskId::from_string(String::new())
}

fn default_cwd() -> String {
    DEFAULT_CWD.to_string()
}

/// One stored command definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier. Deserializes to an empty sentinel when the
    /// source document has no id; the store backfills it on load.
    #[serde(default = "unassigned_id")]
    pub id: TaskId,
    /// Human-facing name. Not required unique at the data level.
    pub name: String,
    /// The shell command text. Opaque to the repository.
    pub command: String,
    /// Working directory the command runs in. `"~"` means the user's home.
    #[serde(default = "default_cwd")]
    pub cwd: String,
    /// Optional free-text description, searched alongside the name.
    #[serde(default)]
    pub description: String,
    /// When the task was last executed. `None` until the first run.
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a task from validated create parameters and a fresh id.
    #[must_use]
    pub fn new(id: TaskId, params: TaskCreateParams) -> Self {
        Self {
            id,
            name: params.name,
            command: params.command,
            cwd: params
                .cwd
                .filter(|c| !c.is_empty())
                .unwrap_or_else(default_cwd),
            description: params.description.unwrap_or_default(),
            last_run: None,
        }
    }

    /// Normalize fields after deserialization: an empty `cwd` falls back
    /// to the home marker, matching the create path.
    pub fn apply_defaults(&mut self) {
        if self.cwd.is_empty() {
            self.cwd = default_cwd();
        }
    }
}

/// Parameters for creating a task.
#[derive(Clone, Debug, Default)]
pub struct TaskCreateParams {
    /// Task name (required, non-empty).
    pub name: String,
    /// Shell command text (required, non-empty).
    pub command: String,
    /// Working directory; defaults to `"~"` when `None` or empty.
    pub cwd: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

impl TaskCreateParams {
    /// Check the non-empty invariants before a task is built.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DeckError::Validation(
                "task name cannot be empty".to_string(),
            ));
        }
        if self.command.trim().is_empty() {
            return Err(DeckError::Validation(
                "task command cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for an existing task. `None` fields are left untouched.
///
/// The id and `last_run` are not editable through updates; `last_run`
/// only moves via the facade's mark-run operation.
#[derive(Clone, Debug, Default)]
pub struct TaskUpdateParams {
    /// New name, if changing.
    pub name: Option<String>,
    /// New command text, if changing.
    pub command: Option<String>,
    /// New working directory, if changing.
    pub cwd: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
}

impl TaskUpdateParams {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.command.is_none()
            && self.cwd.is_none()
            && self.description.is_none()
    }

    /// Check the non-empty invariants for the fields being changed.
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DeckError::Validation(
                "task name cannot be empty".to_string(),
            ));
        }
        if self.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(DeckError::Validation(
                "task command cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the provided fields to a task in place.
    pub fn apply(&self, task: &mut Task) {
        if let Some(ref name) = self.name {
            task.name = name.clone();
        }
        if let Some(ref command) = self.command {
            task.command = command.clone();
        }
        if let Some(ref cwd) = self.cwd {
            task.cwd = if cwd.is_empty() {
                default_cwd()
            } else {
                cwd.clone()
            };
        }
        if let Some(ref description) = self.description {
            task.description = description.clone();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn params(name: &str, command: &str) -> TaskCreateParams {
        TaskCreateParams {
            name: name.to_string(),
            command: command.to_string(),
            ..TaskCreateParams::default()
        }
    }

    #[test]
    fn new_applies_cwd_default() {
        let task = Task::new(TaskId::new(), params("build", "make"));
        assert_eq!(task.cwd, "~");
        assert_eq!(task.description, "");
        assert!(task.last_run.is_none());
    }

    #[test]
    fn new_keeps_explicit_cwd() {
        let mut p = params("build", "make");
        p.cwd = Some("/srv/app".to_string());
        let task = Task::new(TaskId::new(), p);
        assert_eq!(task.cwd, "/srv/app");
    }

    #[test]
    fn empty_cwd_param_falls_back_to_home() {
        let mut p = params("build", "make");
        p.cwd = Some(String::new());
        let task = Task::new(TaskId::new(), p);
        assert_eq!(task.cwd, "~");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let err = params("", "make").validate().unwrap_err();
        assert_matches!(err, DeckError::Validation(_));
    }

    #[test]
    fn validate_rejects_blank_command() {
        let err = params("build", "   ").validate().unwrap_err();
        assert_matches!(err, DeckError::Validation(_));
    }

    #[test]
    fn deserialize_tolerates_missing_fields() {
        let task: Task =
            serde_json::from_str(r#"{"name": "build", "command": "make"}"#).unwrap();
        assert!(task.id.is_empty(), "missing id becomes the unassigned sentinel");
        assert_eq!(task.cwd, "~");
        assert_eq!(task.description, "");
        assert!(task.last_run.is_none());
    }

    #[test]
    fn serde_roundtrip_preserves_last_run() {
        let json = r#"{
            "id": "t-1",
            "name": "build",
            "command": "make",
            "cwd": "/srv",
            "description": "compile",
            "last_run": "2024-01-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.last_run.is_some());
        let back = serde_json::to_string(&task).unwrap();
        let again: Task = serde_json::from_str(&back).unwrap();
        assert_eq!(task, again);
    }

    #[test]
    fn apply_defaults_fills_empty_cwd() {
        let mut task: Task =
            serde_json::from_str(r#"{"name": "n", "command": "c", "cwd": ""}"#).unwrap();
        task.apply_defaults();
        assert_eq!(task.cwd, "~");
    }

    #[test]
    fn update_apply_touches_only_provided_fields() {
        let mut task = Task::new(TaskId::from("t-1"), params("build", "make"));
        let update = TaskUpdateParams {
            cwd: Some("/tmp".to_string()),
            ..TaskUpdateParams::default()
        };
        update.apply(&mut task);
        assert_eq!(task.cwd, "/tmp");
        assert_eq!(task.name, "build");
        assert_eq!(task.command, "make");
    }

    #[test]
    fn update_is_empty() {
        assert!(TaskUpdateParams::default().is_empty());
        let update = TaskUpdateParams {
            name: Some("x".to_string()),
            ..TaskUpdateParams::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn update_validate_rejects_empty_name() {
        let update = TaskUpdateParams {
            name: Some(String::new()),
            ..TaskUpdateParams::default()
        };
        assert_matches!(update.validate().unwrap_err(), DeckError::Validation(_));
    }
}
