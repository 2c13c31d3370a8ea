//! Intake record domain model.
//!
//! # Responsibility
//! - Define one logged drink event (`amount` + `timestamp`).
//! - Validate record invariants on construction and after decoding.
//!
//! # Invariants
//! - `id` is never nil and never reused for another record.
//! - `amount` is a finite value strictly greater than zero (milliliters).
//! - Fields are private so a record cannot change after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one intake record.
pub type RecordId = Uuid;

/// Validation errors for intake record invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordValidationError {
    /// Record id must not be nil.
    NilId,
    /// Amount must be finite and greater than zero.
    NonPositiveAmount(f64),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "intake amount must be a positive number of ml, got {amount}")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// One logged drink event.
///
/// Serialized as `{id, amount, date}`; `date` is an RFC 3339 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    id: RecordId,
    amount: f64,
    #[serde(rename = "date")]
    timestamp: DateTime<Utc>,
}

impl IntakeRecord {
    /// Creates a record with a generated stable ID.
    ///
    /// # Errors
    /// - Returns `NonPositiveAmount` when `amount` is zero, negative or not finite.
    pub fn new(amount: f64, timestamp: DateTime<Utc>) -> Result<Self, RecordValidationError> {
        Self::with_id(Uuid::new_v4(), amount, timestamp)
    }

    /// Creates a record with a caller-provided ID.
    ///
    /// Used by decode paths where identity already exists.
    pub fn with_id(
        id: RecordId,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, RecordValidationError> {
        let record = Self {
            id,
            amount,
            timestamp,
        };
        record.validate()?;
        Ok(record)
    }

    /// Validates record invariants.
    ///
    /// Deserialization bypasses the constructors, so decoded records must be
    /// passed through this before use.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        if !is_positive_amount(self.amount) {
            return Err(RecordValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Amount in milliliters.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Returns whether `amount` is usable as an intake amount.
pub(crate) fn is_positive_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}
