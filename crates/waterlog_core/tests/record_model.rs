use chrono::{TimeZone, Utc};
use uuid::Uuid;
use waterlog_core::{IntakeRecord, RecordValidationError};

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let at = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let record = IntakeRecord::with_id(id, 250.0, at).unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["amount"], 250.0);
    assert_eq!(json["date"], "2026-02-13T10:00:00Z");
    assert!(json.get("timestamp").is_none());

    let decoded: IntakeRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn decoding_accepts_offset_timestamps() {
    let raw = r#"{"id":"11111111-2222-4333-8444-555555555555","amount":100,"date":"2026-02-13T19:00:00+09:00"}"#;
    let record: IntakeRecord = serde_json::from_str(raw).unwrap();

    assert_eq!(
        record.timestamp(),
        Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap()
    );
    assert_eq!(record.amount(), 100.0);
}

#[test]
fn validate_catches_invalid_decoded_records() {
    let raw = r#"{"id":"00000000-0000-0000-0000-000000000000","amount":100,"date":"2026-02-13T10:00:00Z"}"#;
    let record: IntakeRecord = serde_json::from_str(raw).unwrap();
    assert_eq!(record.validate().unwrap_err(), RecordValidationError::NilId);
}
