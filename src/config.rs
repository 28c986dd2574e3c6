use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "VisitScheduler";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed month length used for monthly frequencies.
/// Monthly ranges are not calendar-month arithmetic.
pub const DAYS_PER_MONTH: i64 = 30;

/// Length of a full work week in days.
pub const DAYS_PER_WEEK: i64 = 7;

/// Get the application data directory (~/VisitScheduler/).
/// Falls back to the current directory when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the scheduler database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("scheduler.db")
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "visit_scheduler=info,warn"
}

/// Per-agency scheduling switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerOptions {
    /// Ranged frequencies ("2-3W4") require a non-zero minimum occurrence.
    pub ranged_frequency: bool,
}
