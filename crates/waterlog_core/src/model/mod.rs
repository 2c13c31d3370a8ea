//! Domain model for the daily intake log.
//!
//! # Responsibility
//! - Define the canonical intake record consumed by tracker and storage.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Records are immutable once created; edits are delete + re-add.

pub mod record;
