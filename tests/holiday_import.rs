use std::time::Duration;

use chrono::NaiveDate;

use punchclock_backend::services::holiday_import::{
    parse_holiday_payload, MAX_RETRIES, RETRY_DELAY,
};

#[test]
fn retry_policy_is_fixed() {
    assert_eq!(MAX_RETRIES, 3);
    assert_eq!(RETRY_DELAY, Duration::from_secs(1));
}

#[test]
fn payload_parses_into_dated_entries() {
    let body = r#"{
        "2025-01-01": {"name": "Újév", "isPunishmentDay": false},
        "2025-05-01": {"name": "A munka ünnepe", "isPunishmentDay": false},
        "2025-05-17": {"name": "Áthelyezett munkanap", "isPunishmentDay": true}
    }"#;

    let holidays = parse_holiday_payload(body).expect("valid payload");
    assert_eq!(holidays.len(), 3);

    let new_year = holidays
        .iter()
        .find(|h| h.date == NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        .expect("new year present");
    assert_eq!(new_year.name, "Újév");
    assert!(!new_year.is_workday);

    let moved = holidays
        .iter()
        .find(|h| h.date == NaiveDate::from_ymd_opt(2025, 5, 17).unwrap())
        .expect("moved workday present");
    assert!(moved.is_workday);
}

#[test]
fn empty_object_is_an_empty_year() {
    assert!(parse_holiday_payload("{}").expect("valid payload").is_empty());
}

#[test]
fn malformed_bodies_are_rejected() {
    assert!(parse_holiday_payload("").is_err());
    assert!(parse_holiday_payload("[]").is_err());
    assert!(parse_holiday_payload(r#"{"2025-13-40": {}}"#).is_err());
}
