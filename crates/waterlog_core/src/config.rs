//! Embedding-time configuration and presentation hints.
//!
//! # Responsibility
//! - Gather the settings needed to open a tracker (`TrackerConfig`).
//! - Publish goal/quick-add constants used by settings and drink buttons.
//!
//! # Invariants
//! - The tracker never applies slider bounds; `snap_goal_to_slider` is a pure
//!   helper for presentation code.

use std::path::{Path, PathBuf};

/// Goal used when nothing was persisted yet.
pub const DEFAULT_GOAL_ML: f64 = 2000.0;
/// Amounts offered by the quick-add drink buttons.
pub const QUICK_ADD_AMOUNTS_ML: [f64; 3] = [100.0, 250.0, 500.0];
pub const GOAL_SLIDER_MIN_ML: f64 = 500.0;
pub const GOAL_SLIDER_MAX_ML: f64 = 5000.0;
pub const GOAL_SLIDER_STEP_ML: f64 = 100.0;
/// Database file name created inside the app data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "waterlog.sqlite3";

/// Logging settings forwarded to `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: String,
}

/// Settings for [`crate::bootstrap::open_tracker`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub default_goal: f64,
    /// `None` leaves logging untouched (e.g. already initialized by the host).
    pub logging: Option<LoggingConfig>,
}

impl TrackerConfig {
    /// Config storing the database as `waterlog.sqlite3` inside `data_dir`.
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            db_path: data_dir.as_ref().join(DEFAULT_DB_FILE_NAME),
            default_goal: DEFAULT_GOAL_ML,
            logging: None,
        }
    }

    pub fn with_default_goal(mut self, goal: f64) -> Self {
        self.default_goal = goal;
        self
    }

    pub fn with_logging(mut self, level: impl Into<String>, log_dir: impl Into<String>) -> Self {
        self.logging = Some(LoggingConfig {
            level: level.into(),
            log_dir: log_dir.into(),
        });
        self
    }
}

/// Rounds `value` to the settings slider step and bounds.
pub fn snap_goal_to_slider(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_GOAL_ML;
    }
    let stepped = (value / GOAL_SLIDER_STEP_ML).round() * GOAL_SLIDER_STEP_ML;
    stepped.clamp(GOAL_SLIDER_MIN_ML, GOAL_SLIDER_MAX_ML)
}

#[cfg(test)]
mod tests {
    use super::{snap_goal_to_slider, TrackerConfig, DEFAULT_GOAL_ML};
    use std::path::Path;

    #[test]
    fn snap_rounds_to_step_and_clamps() {
        assert_eq!(snap_goal_to_slider(2049.0), 2000.0);
        assert_eq!(snap_goal_to_slider(2051.0), 2100.0);
        assert_eq!(snap_goal_to_slider(10.0), 500.0);
        assert_eq!(snap_goal_to_slider(99_999.0), 5000.0);
        assert_eq!(snap_goal_to_slider(f64::NAN), DEFAULT_GOAL_ML);
    }

    #[test]
    fn in_data_dir_uses_default_file_name() {
        let config = TrackerConfig::in_data_dir("/var/lib/waterlog");
        assert_eq!(
            config.db_path,
            Path::new("/var/lib/waterlog").join("waterlog.sqlite3")
        );
        assert_eq!(config.default_goal, DEFAULT_GOAL_ML);
        assert!(config.logging.is_none());
    }
}
