//! The on-disk task collection.
//!
//! `tasks.json` is loaded once, held in memory for the process lifetime,
//! and written back in full after every mutation (write-through, no
//! batching). The store exclusively owns the in-memory collection; the
//! selection engine only borrows it.
//!
//! Load-time integrity rules:
//!
//! - a missing or empty file is an empty collection, not an error
//! - unparsable JSON surfaces as [`DeckError::CorruptData`] and the file
//!   is left untouched
//! - records with a missing, empty, or duplicated id get a fresh unique
//!   id, and the corrected document is persisted before the load returns
//!
//! A mutation that fails to persist is rolled back in memory, so callers
//! can treat it as not-committed and retry.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use taskdeck_core::errors::{DeckError, Result};
use taskdeck_core::ids::TaskId;
use taskdeck_core::task::{Task, TaskCreateParams, TaskUpdateParams};

use crate::atomic;
use crate::paths::Config;

/// Generate an id guaranteed distinct from every id in `existing`.
///
/// UUID v7 collisions are vanishingly rare; the retry loop makes the
/// uniqueness contract unconditional regardless.
#[must_use]
pub fn generate_id(existing: &HashSet<String>) -> TaskId {
    loop {
        let id = TaskId::new();
        if !existing.contains(id.as_str()) {
            return id;
        }
    }
}

/// The persisted task collection.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the collection from `config`, backfilling ids as needed.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.tasks_path();
        let (tasks, dirty) = read_collection(&path)?;
        let store = Self { path, tasks };
        if dirty {
            store.save()?;
            debug!(path = %store.path.display(), "rewrote tasks file with backfilled ids");
        }
        Ok(store)
    }

    /// Read-only view of the collection, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Absolute path of the persisted document, for display.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Atomically replace the persisted document with the in-memory state.
    pub fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.tasks).map_err(|e| {
            DeckError::persistence(&self.path, io::Error::new(io::ErrorKind::InvalidData, e))
        })?;
        atomic::replace_file(&self.path, &bytes)
            .map_err(|e| DeckError::persistence(&self.path, e))
    }

    /// Validate, assign a fresh id, append, and persist a new task.
    pub fn add(&mut self, params: TaskCreateParams) -> Result<Task> {
        params.validate()?;
        let existing: HashSet<String> = self
            .tasks
            .iter()
            .map(|t| t.id.as_str().to_owned())
            .collect();
        let task = Task::new(generate_id(&existing), params);
        self.tasks.push(task.clone());
        if let Err(e) = self.save() {
            let _ = self.tasks.pop();
            return Err(e);
        }
        debug!(id = %task.id, name = %task.name, "task added");
        Ok(task)
    }

    /// Apply a partial update to the task with `id` and persist.
    pub fn update(&mut self, id: &TaskId, params: &TaskUpdateParams) -> Result<Task> {
        params.validate()?;
        let index = self
            .index_of(id)
            .ok_or_else(|| DeckError::not_found(id.as_str()))?;
        let previous = self.tasks[index].clone();
        params.apply(&mut self.tasks[index]);
        let updated = self.tasks[index].clone();
        if let Err(e) = self.save() {
            self.tasks[index] = previous;
            return Err(e);
        }
        debug!(id = %updated.id, "task updated");
        Ok(updated)
    }

    /// Remove the task with `id` and persist. The id is never reused.
    pub fn remove(&mut self, id: &TaskId) -> Result<Task> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DeckError::not_found(id.as_str()))?;
        let removed = self.tasks.remove(index);
        match self.save() {
            Ok(()) => {
                debug!(id = %removed.id, name = %removed.name, "task removed");
                Ok(removed)
            }
            Err(e) => {
                self.tasks.insert(index, removed);
                Err(e)
            }
        }
    }

    /// Stamp the task with `id` as run now and persist.
    pub fn touch(&mut self, id: &TaskId) -> Result<Task> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DeckError::not_found(id.as_str()))?;
        let previous = self.tasks[index].last_run;
        self.tasks[index].last_run = Some(Utc::now());
        let updated = self.tasks[index].clone();
        match self.save() {
            Ok(()) => Ok(updated),
            Err(e) => {
                self.tasks[index].last_run = previous;
                Err(e)
            }
        }
    }

    fn index_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

fn read_collection(path: &Path) -> Result<(Vec<Task>, bool)> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((Vec::new(), false)),
        Err(e) => return Err(DeckError::persistence(path, e)),
    };
    if content.trim().is_empty() {
        return Ok((Vec::new(), false));
    }

    let mut tasks: Vec<Task> =
        serde_json::from_str(&content).map_err(|e| DeckError::corrupt(path, e))?;

    let mut existing: HashSet<String> = tasks
        .iter()
        .filter(|t| !t.id.is_empty())
        .map(|t| t.id.as_str().to_owned())
        .collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut dirty = false;

    for task in &mut tasks {
        task.apply_defaults();
        if task.id.is_empty() || seen.contains(task.id.as_str()) {
            let fresh = generate_id(&existing);
            warn!(name = %task.name, id = %fresh, "assigned fresh id to task");
            let _ = existing.insert(fresh.as_str().to_owned());
            task.id = fresh;
            dirty = true;
        }
        let _ = seen.insert(task.id.as_str().to_owned());
    }

    Ok((tasks, dirty))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
