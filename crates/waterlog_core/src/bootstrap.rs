//! One-call tracker startup for embedding hosts.
//!
//! # Responsibility
//! - Initialize logging when configured, open the store, load the tracker.
//!
//! # Invariants
//! - Startup never panics; every failure is returned as `BootstrapError`.

use crate::clock::SystemClock;
use crate::config::TrackerConfig;
use crate::db::DbError;
use crate::logging::init_logging;
use crate::service::tracker::TrackerState;
use crate::store::sqlite_kv::SqliteKeyValueStore;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum BootstrapError {
    /// Logging backend rejected the configuration.
    Logging(String),
    /// Data directory could not be created.
    Io(std::io::Error),
    Db(DbError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Io(err) => write!(f, "failed to prepare data directory: {err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Opens the SQLite-backed tracker described by `config`.
pub fn open_tracker(
    config: &TrackerConfig,
) -> Result<TrackerState<SqliteKeyValueStore>, BootstrapError> {
    if let Some(logging) = &config.logging {
        init_logging(&logging.level, &logging.log_dir).map_err(BootstrapError::Logging)?;
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            error!(
                "event=tracker_init module=bootstrap status=error error_code=data_dir_failed error={err}"
            );
            BootstrapError::Io(err)
        })?;
    }

    let store = SqliteKeyValueStore::open(&config.db_path)?;
    Ok(TrackerState::load_with(store, SystemClock, config.default_goal))
}
