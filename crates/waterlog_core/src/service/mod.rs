//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory intake log and route every mutation through storage.
//! - Keep presentation layers decoupled from persistence details.

pub mod tracker;
