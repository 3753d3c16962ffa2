//! Config directory resolution.
//!
//! The data directory is environment-driven: `$XDG_CONFIG_HOME/taskdeck`
//! when `XDG_CONFIG_HOME` is set, otherwise `$HOME/.config/taskdeck`.
//! Tests (and anything else that needs isolation) construct a [`Config`]
//! at an explicit directory instead of touching process-global state.

use std::path::{Path, PathBuf};

use taskdeck_core::constants::NAME;

/// Resolved locations of the persisted files.
#[derive(Clone, Debug)]
pub struct Config {
    dir: PathBuf,
}

impl Config {
    /// Resolve the config directory from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = match std::env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(NAME),
            _ => {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".config").join(NAME)
            }
        };
        Self { dir }
    }

    /// Use an explicit directory (isolated test stores, overrides).
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The config directory itself.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the task collection document.
    #[must_use]
    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join("tasks.json")
    }

    /// Path of the run-history document.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
