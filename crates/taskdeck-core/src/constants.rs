//! Package-level constants and tuning defaults.

/// Current version of taskdeck (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name. Also the config directory name under `$XDG_CONFIG_HOME`.
pub const NAME: &str = "taskdeck";

/// Working directory a task falls back to when none was recorded.
pub const DEFAULT_CWD: &str = "~";

/// Minimum similarity score (0-100) for a task to appear in search results.
pub const SCORE_CUTOFF: u8 = 60;

/// Maximum number of run-history entries kept on disk.
pub const HISTORY_MAX_ENTRIES: usize = 200;

/// Number of per-directory recommendations surfaced in the picker.
pub const RECOMMENDATIONS_COUNT: usize = 5;
