//! Core state layer for WaterLog, a daily water-intake tracker.
//! This crate owns the intake log, its persistence, and the daily reset rule.

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod service;
pub mod store;

pub use bootstrap::{open_tracker, BootstrapError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    snap_goal_to_slider, LoggingConfig, TrackerConfig, DEFAULT_GOAL_ML, QUICK_ADD_AMOUNTS_ML,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{IntakeRecord, RecordId, RecordValidationError};
pub use policy::daily_reset::{should_reset, should_reset_in};
pub use service::tracker::{
    InvalidOperation, ProgressSummary, SubscriptionId, TrackerError, TrackerEvent,
    TrackerResult, TrackerState,
};
pub use store::intake_store::{IntakeStore, GOAL_KEY, RECORDS_KEY};
pub use store::sqlite_kv::SqliteKeyValueStore;
pub use store::{KeyValueStore, StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
