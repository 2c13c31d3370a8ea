//! Daily reset decision.
//!
//! # Responsibility
//! - Decide whether today's log must be wiped because it belongs to a past day.
//!
//! # Invariants
//! - Only the first record (most recent by insertion) is inspected, even when
//!   the list is not in chronological order.
//! - An empty log never resets.
//! - Dates are compared on the local calendar, not in UTC.

use crate::model::record::IntakeRecord;
use chrono::{DateTime, Local, TimeZone, Utc};

/// Returns whether `records` must be cleared at `now`, using the local zone.
pub fn should_reset(records: &[IntakeRecord], now: DateTime<Utc>) -> bool {
    should_reset_in(records, now, &Local)
}

/// Same as [`should_reset`] with an explicit calendar zone.
pub fn should_reset_in<Tz: TimeZone>(
    records: &[IntakeRecord],
    now: DateTime<Utc>,
    zone: &Tz,
) -> bool {
    let Some(latest) = records.first() else {
        return false;
    };
    !is_same_calendar_day(latest.timestamp(), now, zone)
}

/// Returns whether both instants fall on the same calendar date in `zone`.
pub fn is_same_calendar_day<Tz: TimeZone>(
    a: DateTime<Utc>,
    b: DateTime<Utc>,
    zone: &Tz,
) -> bool {
    a.with_timezone(zone).date_naive() == b.with_timezone(zone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::{is_same_calendar_day, should_reset_in};
    use crate::model::record::IntakeRecord;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn record(timestamp: DateTime<Utc>) -> IntakeRecord {
        IntakeRecord::new(200.0, timestamp).unwrap()
    }

    #[test]
    fn empty_log_never_resets() {
        assert!(!should_reset_in(&[], at(2026, 4, 10, 12, 0), &Utc));
    }

    #[test]
    fn first_record_from_today_keeps_log() {
        let now = at(2026, 4, 10, 18, 0);
        let records = vec![record(at(2026, 4, 10, 0, 5))];
        assert!(!should_reset_in(&records, now, &Utc));
    }

    #[test]
    fn first_record_from_yesterday_resets() {
        let now = at(2026, 4, 10, 0, 1);
        let records = vec![record(at(2026, 4, 9, 23, 59))];
        assert!(should_reset_in(&records, now, &Utc));
    }

    #[test]
    fn only_first_record_is_inspected() {
        let now = at(2026, 4, 10, 12, 0);
        // Out of chronological order: the stale entry is not first.
        let records = vec![record(now), record(now - Duration::days(3))];
        assert!(!should_reset_in(&records, now, &Utc));

        let records = vec![record(now - Duration::days(3)), record(now)];
        assert!(should_reset_in(&records, now, &Utc));
    }

    #[test]
    fn calendar_day_follows_the_given_zone() {
        // 23:30 UTC on the 9th is already the 10th in UTC+9.
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let late = at(2026, 4, 9, 23, 30);
        let morning = at(2026, 4, 10, 1, 0);

        assert!(is_same_calendar_day(late, morning, &seoul));
        assert!(!is_same_calendar_day(late, morning, &Utc));
    }
}
