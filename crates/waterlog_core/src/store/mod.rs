//! Durable key-value persistence for the intake log.
//!
//! # Responsibility
//! - Define the raw `KeyValueStore` contract (`get` / `set` of text values).
//! - Provide the SQLite implementation and the typed `IntakeStore` codec.
//!
//! # Invariants
//! - `set` returns only after the write was attempted; failures are reported,
//!   never retried here.
//! - Store errors carry the key they relate to when one is known.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod intake_store;
pub mod sqlite_kv;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for key-value reads/writes and their JSON codec.
#[derive(Debug)]
pub enum StoreError {
    /// Storage backend failure.
    Db(DbError),
    /// Value could not be encoded before writing.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Persisted value is not valid JSON for the key's shape.
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Persisted value decoded but violates domain invariants.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
            Self::Decode { key, source } => write!(f, "failed to decode `{key}`: {source}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw text key-value persistence contract.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, or `None` when never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the stored value for `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
