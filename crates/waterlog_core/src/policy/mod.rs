//! Pure policies applied by the tracker.

pub mod daily_reset;
