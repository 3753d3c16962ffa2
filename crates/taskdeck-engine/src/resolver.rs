//! Reference resolution.
//!
//! A reference is whatever the user typed to identify one task: an id or
//! a name. Ids are the only field guaranteed unique, so the lookup is
//! two-tier: exact id match first, then exact (case-sensitive,
//! full-string) name match. Name collisions are permitted at the data
//! level but forbidden at the point of action; a duplicated name resolves
//! to [`DeckError::AmbiguousName`] carrying every candidate id so the
//! caller can re-specify.

use taskdeck_core::errors::{DeckError, Result};
use taskdeck_core::task::Task;

/// Resolve `reference` against the collection to exactly one task.
pub fn resolve<'a>(tasks: &'a [Task], reference: &str) -> Result<&'a Task> {
    if let Some(task) = tasks.iter().find(|t| t.id.as_str() == reference) {
        return Ok(task);
    }

    let matches: Vec<&Task> = tasks.iter().filter(|t| t.name == reference).collect();
    match matches.as_slice() {
        [] => Err(DeckError::not_found(reference)),
        [task] => Ok(*task),
        many => Err(DeckError::ambiguous(
            reference,
            many.iter().map(|t| t.id.clone()).collect(),
        )),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use taskdeck_core::ids::TaskId;

    fn task(id: &str, name: &str) -> Task {
        Task {
            id: TaskId::from(id),
            name: name.to_string(),
            command: "true".to_string(),
            cwd: "~".to_string(),
            description: String::new(),
            last_run: None,
        }
    }

    #[test]
    fn resolves_by_id() {
        let tasks = vec![task("t-1", "build"), task("t-2", "test")];
        assert_eq!(resolve(&tasks, "t-2").unwrap().name, "test");
    }

    #[test]
    fn id_wins_even_with_duplicate_names_elsewhere() {
        let tasks = vec![task("t-1", "deploy"), task("t-2", "deploy")];
        assert_eq!(resolve(&tasks, "t-1").unwrap().id.as_str(), "t-1");
    }

    #[test]
    fn resolves_unique_name() {
        let tasks = vec![task("t-1", "build"), task("t-2", "test")];
        assert_eq!(resolve(&tasks, "build").unwrap().id.as_str(), "t-1");
    }

    #[test]
    fn name_match_is_case_sensitive_and_full_string() {
        let tasks = vec![task("t-1", "Build")];
        assert_matches!(resolve(&tasks, "build"), Err(DeckError::NotFound { .. }));
        assert_matches!(resolve(&tasks, "Buil"), Err(DeckError::NotFound { .. }));
    }

    #[test]
    fn unknown_reference_is_not_found() {
        let tasks = vec![task("t-1", "build")];
        let err = resolve(&tasks, "nope").unwrap_err();
        assert_matches!(err, DeckError::NotFound { .. });
    }

    #[test]
    fn duplicated_name_is_ambiguous_with_all_candidates() {
        let tasks = vec![
            task("t-1", "deploy"),
            task("t-2", "build"),
            task("t-3", "deploy"),
        ];
        let err = resolve(&tasks, "deploy").unwrap_err();
        match err {
            DeckError::AmbiguousName { name, candidates } => {
                assert_eq!(name, "deploy");
                assert_eq!(candidates, vec![TaskId::from("t-1"), TaskId::from("t-3")]);
            }
            other => panic!("expected AmbiguousName, got {other:?}"),
        }
    }

    #[test]
    fn id_shaped_name_still_resolves_as_name() {
        // A name that happens to look like an id resolves through the
        // name tier when no id matches it.
        let tasks = vec![task("t-1", "t-9")];
        assert_eq!(resolve(&tasks, "t-9").unwrap().id.as_str(), "t-1");
    }
}
