//! Typed persistence for the goal and today's intake records.
//!
//! # Responsibility
//! - Encode/decode the two persisted keys with `serde_json`.
//! - Turn unreadable persisted state into "no prior data" at startup.
//!
//! # Invariants
//! - Decoded records are validated; one bad record discards the whole list.
//! - `load_*` never fail; `try_load_*` and `save_*` report errors to the caller.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::model::record::IntakeRecord;
use log::{debug, warn};

/// Key holding the daily goal as a JSON number.
pub const GOAL_KEY: &str = "targetGoal";
/// Key holding today's records as a JSON array of `{id, amount, date}`.
pub const RECORDS_KEY: &str = "todayIntakeRecords";

/// Codec layer over a raw key-value store.
pub struct IntakeStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> IntakeStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Returns the wrapped raw store.
    pub fn inner(&self) -> &S {
        &self.kv
    }

    /// Loads the persisted goal, or `None` when missing or unreadable.
    ///
    /// Read failures are logged as `store_read` errors.
    pub fn load_goal(&self) -> Option<f64> {
        match self.try_load_goal() {
            Ok(goal) => goal,
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error key={GOAL_KEY} fallback=default error={err}"
                );
                None
            }
        }
    }

    /// Loads persisted records, or an empty list when missing or unreadable.
    ///
    /// Read failures are logged as `store_read` errors.
    pub fn load_records(&self) -> Vec<IntakeRecord> {
        match self.try_load_records() {
            Ok(records) => {
                debug!(
                    "event=store_read module=store status=ok key={RECORDS_KEY} count={}",
                    records.len()
                );
                records
            }
            Err(err) => {
                warn!(
                    "event=store_read module=store status=error key={RECORDS_KEY} fallback=empty error={err}"
                );
                Vec::new()
            }
        }
    }

    pub fn try_load_goal(&self) -> StoreResult<Option<f64>> {
        let Some(raw) = self.kv.get(GOAL_KEY)? else {
            return Ok(None);
        };
        let goal: f64 = serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            key: GOAL_KEY,
            source,
        })?;
        Ok(Some(goal))
    }

    pub fn try_load_records(&self) -> StoreResult<Vec<IntakeRecord>> {
        let Some(raw) = self.kv.get(RECORDS_KEY)? else {
            return Ok(Vec::new());
        };
        decode_records(&raw)
    }

    /// Persists the goal.
    pub fn save_goal(&self, goal: f64) -> StoreResult<()> {
        if !goal.is_finite() {
            // serde_json writes non-finite floats as `null`, which would not decode.
            return Err(StoreError::InvalidData(format!(
                "goal `{goal}` is not a finite number"
            )));
        }
        let encoded = serde_json::to_string(&goal).map_err(|source| StoreError::Encode {
            key: GOAL_KEY,
            source,
        })?;
        self.kv.set(GOAL_KEY, &encoded)
    }

    /// Persists the full ordered record collection.
    pub fn save_records(&self, records: &[IntakeRecord]) -> StoreResult<()> {
        let encoded = encode_records(records)?;
        self.kv.set(RECORDS_KEY, &encoded)
    }
}

/// Encodes records into the persisted wire shape.
pub fn encode_records(records: &[IntakeRecord]) -> StoreResult<String> {
    serde_json::to_string(records).map_err(|source| StoreError::Encode {
        key: RECORDS_KEY,
        source,
    })
}

/// Decodes and validates records from the persisted wire shape.
pub fn decode_records(raw: &str) -> StoreResult<Vec<IntakeRecord>> {
    let records: Vec<IntakeRecord> =
        serde_json::from_str(raw).map_err(|source| StoreError::Decode {
            key: RECORDS_KEY,
            source,
        })?;

    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|err| {
            StoreError::InvalidData(format!("`{RECORDS_KEY}` entry {index}: {err}"))
        })?;
    }

    Ok(records)
}
