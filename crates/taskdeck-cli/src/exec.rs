//! Task execution.
//!
//! The repository core never spawns anything; this module consumes a
//! resolved task's `command` and `cwd`. The command runs through the
//! user's shell (`$SHELL`, falling back to `/bin/sh`) with inherited
//! stdio, after expanding a leading `~` in the working directory.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::info;

use taskdeck_core::task::Task;

/// Run a task's command in its working directory and wait for it.
pub fn run_task(task: &Task) -> Result<ExitStatus> {
    let cwd = expand_home(&task.cwd);
    let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
    info!(name = %task.name, command = %task.command, cwd = %cwd.display(), "running task");

    Command::new(&shell)
        .arg("-c")
        .arg(&task.command)
        .current_dir(&cwd)
        .status()
        .with_context(|| {
            format!(
                "failed to run '{}' in {} via {shell}",
                task.command,
                cwd.display()
            )
        })
}

/// Expand a leading `~` against `$HOME`.
fn expand_home(cwd: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    expand_home_in(cwd, &home)
}

fn expand_home_in(cwd: &str, home: &str) -> PathBuf {
    match cwd.strip_prefix("~") {
        Some("") => PathBuf::from(home),
        Some(rest) if rest.starts_with('/') => {
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(cwd),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::ids::TaskId;

    fn task(command: &str, cwd: &str) -> Task {
        Task {
            id: TaskId::from("t-1"),
            name: "test".to_string(),
            command: command.to_string(),
            cwd: cwd.to_string(),
            description: String::new(),
            last_run: None,
        }
    }

    #[test]
    fn bare_tilde_expands_to_home() {
        assert_eq!(expand_home_in("~", "/home/u"), PathBuf::from("/home/u"));
    }

    #[test]
    fn tilde_prefix_expands() {
        assert_eq!(
            expand_home_in("~/src/app", "/home/u"),
            PathBuf::from("/home/u/src/app")
        );
    }

    #[test]
    fn tilde_in_the_middle_is_left_alone() {
        assert_eq!(expand_home_in("/a/~b", "/home/u"), PathBuf::from("/a/~b"));
    }

    #[test]
    fn absolute_path_passes_through() {
        assert_eq!(expand_home_in("/srv/app", "/home/u"), PathBuf::from("/srv/app"));
    }

    #[test]
    fn run_task_reports_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let ok = run_task(&task("exit 0", &dir.path().display().to_string())).unwrap();
        assert!(ok.success());
        let fail = run_task(&task("exit 3", &dir.path().display().to_string())).unwrap();
        assert_eq!(fail.code(), Some(3));
    }

    #[test]
    fn run_task_runs_in_the_requested_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("was-here");
        let status = run_task(&task(
            "touch was-here",
            &dir.path().display().to_string(),
        ))
        .unwrap();
        assert!(status.success());
        assert!(marker.exists());
    }
}
