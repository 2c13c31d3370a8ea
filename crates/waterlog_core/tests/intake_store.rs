use chrono::{Duration, TimeZone, Utc};
use waterlog_core::{
    IntakeRecord, IntakeStore, KeyValueStore, SqliteKeyValueStore, StoreError, GOAL_KEY,
    RECORDS_KEY,
};

#[test]
fn missing_keys_load_as_no_prior_data() {
    let store = IntakeStore::new(SqliteKeyValueStore::open_in_memory().unwrap());

    assert_eq!(store.load_goal(), None);
    assert!(store.load_records().is_empty());
}

#[test]
fn records_roundtrip_preserves_order_and_values() {
    let store = IntakeStore::new(SqliteKeyValueStore::open_in_memory().unwrap());
    let base = Utc.with_ymd_and_hms(2026, 7, 4, 8, 0, 0).unwrap();
    let records = vec![
        IntakeRecord::new(100.0, base + Duration::hours(2)).unwrap(),
        IntakeRecord::new(250.5, base + Duration::hours(1)).unwrap(),
        IntakeRecord::new(500.0, base).unwrap(),
    ];

    store.save_records(&records).unwrap();

    assert_eq!(store.load_records(), records);
}

#[test]
fn goal_roundtrip_uses_json_number() {
    let store = IntakeStore::new(SqliteKeyValueStore::open_in_memory().unwrap());
    store.save_goal(2750.0).unwrap();

    assert_eq!(store.load_goal(), Some(2750.0));
    assert_eq!(store.inner().get(GOAL_KEY).unwrap().as_deref(), Some("2750.0"));
}

#[test]
fn corrupt_records_fall_back_to_empty() {
    let kv = SqliteKeyValueStore::open_in_memory().unwrap();
    kv.set(RECORDS_KEY, "[{\"id\": 5}]").unwrap();
    let store = IntakeStore::new(&kv);

    assert!(matches!(
        store.try_load_records().unwrap_err(),
        StoreError::Decode { .. }
    ));
    assert!(store.load_records().is_empty());
}

#[test]
fn one_invalid_record_discards_whole_list() {
    let kv = SqliteKeyValueStore::open_in_memory().unwrap();
    kv.set(
        RECORDS_KEY,
        r#"[
            {"id":"11111111-2222-4333-8444-555555555555","amount":200,"date":"2026-07-04T08:00:00Z"},
            {"id":"11111111-2222-4333-8444-666666666666","amount":-1,"date":"2026-07-04T07:00:00Z"}
        ]"#,
    )
    .unwrap();
    let store = IntakeStore::new(&kv);

    assert!(matches!(
        store.try_load_records().unwrap_err(),
        StoreError::InvalidData(_)
    ));
    assert!(store.load_records().is_empty());
}

#[test]
fn corrupt_goal_falls_back_to_none() {
    let kv = SqliteKeyValueStore::open_in_memory().unwrap();
    kv.set(GOAL_KEY, "lots").unwrap();
    let store = IntakeStore::new(&kv);

    assert_eq!(store.load_goal(), None);
}

#[test]
fn non_finite_goal_is_not_written() {
    let kv = SqliteKeyValueStore::open_in_memory().unwrap();
    let store = IntakeStore::new(&kv);

    assert!(store.save_goal(f64::INFINITY).is_err());
    assert_eq!(kv.get(GOAL_KEY).unwrap(), None);
}
