//! The repository facade.
//!
//! [`TaskService`] composes the store, resolver, and ranker into the
//! CRUD + query API both the interactive picker and the command-line
//! management surface consume. Every mutating operation is
//! resolve-then-act, so the ambiguity and not-found contracts hold
//! uniformly regardless of entry point.
//!
//! The run history is best-effort: an unreadable log degrades to an
//! empty one with a warning, and a failed history append never fails the
//! run that triggered it. The task collection itself is never treated
//! that way; its errors always surface.

use std::path::Path;

use tracing::warn;

use taskdeck_core::errors::Result;
use taskdeck_core::task::{Task, TaskCreateParams, TaskUpdateParams};
use taskdeck_store::{Config, RunHistory, TaskStore};

use crate::ranker;
use crate::resolver;

/// CRUD + query facade over the persisted task collection.
pub struct TaskService {
    store: TaskStore,
    history: RunHistory,
}

impl TaskService {
    /// Open the service against `config`, loading both documents.
    pub fn open(config: &Config) -> Result<Self> {
        let store = TaskStore::open(config)?;
        let history = match RunHistory::open(config) {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "run history unreadable; starting with an empty log");
                RunHistory::empty(config)
            }
        };
        Ok(Self { store, history })
    }

    /// Every task, in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Resolve a reference (id or name) to exactly one task.
    pub fn find(&self, reference: &str) -> Result<&Task> {
        resolver::resolve(self.store.tasks(), reference)
    }

    /// Rank the collection against a free-text query.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Task> {
        ranker::rank(self.store.tasks(), query)
    }

    /// Create a task. Duplicate names are allowed with a warning;
    /// ambiguity is enforced at the point of action instead.
    pub fn create(&mut self, params: TaskCreateParams) -> Result<Task> {
        if self.store.tasks().iter().any(|t| t.name == params.name) {
            warn!(name = %params.name, "a task with this name already exists; adding anyway");
        }
        self.store.add(params)
    }

    /// Resolve a reference, then apply a partial update to that task.
    pub fn modify(&mut self, reference: &str, params: &TaskUpdateParams) -> Result<Task> {
        let id = self.find(reference)?.id.clone();
        self.store.update(&id, params)
    }

    /// Resolve a reference, then remove that task. Destructive intent is
    /// the caller's to confirm.
    pub fn destroy(&mut self, reference: &str) -> Result<Task> {
        let id = self.find(reference)?.id.clone();
        self.store.remove(&id)
    }

    /// Resolve a reference, stamp it as run now, persist, and record the
    /// run in the history log.
    pub fn mark_run(&mut self, reference: &str, invoked_from: &str) -> Result<Task> {
        let id = self.find(reference)?.id.clone();
        let task = self.store.touch(&id)?;
        if let Err(e) = self.history.record(&id, invoked_from) {
            warn!(error = %e, "failed to record run history");
        }
        Ok(task)
    }

    /// Tasks most recently run from `cwd`, newest first. Tasks deleted
    /// since their last run are skipped.
    #[must_use]
    pub fn recommendations(&self, cwd: &str, limit: usize) -> Vec<&Task> {
        self.history
            .recent_task_ids_for_dir(cwd, limit)
            .into_iter()
            .filter_map(|id| self.store.get(&id))
            .collect()
    }

    /// Absolute path of the persisted task document, for display.
    #[must_use]
    pub fn tasks_path(&self) -> &Path {
        self.store.path()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use taskdeck_core::errors::DeckError;

    fn service(dir: &tempfile::TempDir) -> TaskService {
        TaskService::open(&Config::at_dir(dir.path())).unwrap()
    }

    fn create(name: &str, command: &str) -> TaskCreateParams {
        TaskCreateParams {
            name: name.to_string(),
            command: command.to_string(),
            ..TaskCreateParams::default()
        }
    }

    #[test]
    fn create_then_destroy_then_find_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let _ = service.create(create("X", "echo hi")).unwrap();
        let _ = service.destroy("X").unwrap();
        assert_matches!(service.find("X"), Err(DeckError::NotFound { .. }));
    }

    #[test]
    fn modify_duplicate_name_is_ambiguous_then_succeeds_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let first = service.create(create("Deploy", "make deploy")).unwrap();
        let second = service.create(create("Deploy", "make deploy-2")).unwrap();

        let update = TaskUpdateParams {
            cwd: Some("/tmp".to_string()),
            ..TaskUpdateParams::default()
        };
        let err = service.modify("Deploy", &update).unwrap_err();
        match err {
            DeckError::AmbiguousName { candidates, .. } => {
                assert_eq!(candidates, vec![first.id.clone(), second.id.clone()]);
            }
            other => panic!("expected AmbiguousName, got {other:?}"),
        }

        let updated = service.modify(first.id.as_str(), &update).unwrap();
        assert_eq!(updated.cwd, "/tmp");
        let untouched = service.find(second.id.as_str()).unwrap();
        assert_eq!(untouched.cwd, "~", "only the referenced record changes");
    }

    #[test]
    fn find_by_id_ignores_name_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let a = service.create(create("Deploy", "one")).unwrap();
        let _ = service.create(create("Deploy", "two")).unwrap();
        assert_eq!(service.find(a.id.as_str()).unwrap().command, "one");
    }

    #[test]
    fn search_prefers_similarity_over_recency() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let _ = service.create(create("Build", "make")).unwrap();
        let ran = service.create(create("Buidl", "make")).unwrap();
        let _ = service.mark_run(ran.id.as_str(), "/x").unwrap();

        let results = service.search("Build");
        let names: Vec<&str> = results.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Build", "Buidl"]);
    }

    #[test]
    fn mark_run_sets_last_run_and_feeds_recommendations() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let task = service.create(create("build", "make")).unwrap();
        assert!(service.recommendations("/srv", 5).is_empty());

        let ran = service.mark_run("build", "/srv").unwrap();
        assert!(ran.last_run.is_some());

        let recs = service.recommendations("/srv", 5);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, task.id);
        assert!(service.recommendations("/other", 5).is_empty());
    }

    #[test]
    fn recommendations_skip_deleted_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let task = service.create(create("build", "make")).unwrap();
        let _ = service.mark_run(task.id.as_str(), "/srv").unwrap();
        let _ = service.destroy(task.id.as_str()).unwrap();
        assert!(service.recommendations("/srv", 5).is_empty());
    }

    #[test]
    fn destroy_by_ambiguous_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service(&dir);
        let _ = service.create(create("x", "one")).unwrap();
        let _ = service.create(create("x", "two")).unwrap();
        assert_matches!(
            service.destroy("x"),
            Err(DeckError::AmbiguousName { .. })
        );
        assert_eq!(service.list_all().len(), 2, "nothing was deleted");
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::at_dir(dir.path());
        {
            let mut service = TaskService::open(&config).unwrap();
            let _ = service.create(create("persisted", "true")).unwrap();
        }
        let service = TaskService::open(&config).unwrap();
        assert_eq!(service.list_all().len(), 1);
        assert_eq!(service.list_all()[0].name, "persisted");
    }

    #[test]
    fn corrupt_history_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::at_dir(dir.path());
        std::fs::create_dir_all(config.dir()).unwrap();
        std::fs::write(config.history_path(), "not json").unwrap();

        let mut service = TaskService::open(&config).unwrap();
        let task = service.create(create("build", "make")).unwrap();
        let _ = service.mark_run(task.id.as_str(), "/srv").unwrap();
        assert_eq!(service.recommendations("/srv", 5).len(), 1);
    }
}
