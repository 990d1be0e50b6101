use chrono::{NaiveDate, NaiveTime};

use punchclock_backend::models::work_event::{EventType, WorkEvent};
use punchclock_backend::services::worktime::{day_worked_minutes, FULL_DAY_MINUTES};
use punchclock_backend::types::{OrganizationId, UserId};

fn day_of(events: &[(EventType, u32, u32)]) -> Vec<WorkEvent> {
    let user = UserId::new();
    let org = OrganizationId::new();
    let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(); // Monday
    events
        .iter()
        .map(|&(event_type, hh, mm)| {
            WorkEvent::new(
                user,
                org,
                event_type,
                date,
                NaiveTime::from_hms_opt(hh, mm, 0).unwrap(),
            )
        })
        .collect()
}

#[test]
fn simple_day_counts_start_to_end() {
    let events = day_of(&[(EventType::WorkStart, 8, 0), (EventType::WorkEnd, 16, 30)]);
    assert_eq!(day_worked_minutes(&events), 510);
}

#[test]
fn departures_pause_the_clock() {
    // 8:00-12:00 worked, 12:00-12:30 away, 12:30-16:30 worked.
    let events = day_of(&[
        (EventType::WorkStart, 8, 0),
        (EventType::PrivateDeparture, 12, 0),
        (EventType::ReturnFromDeparture, 12, 30),
        (EventType::WorkEnd, 16, 30),
    ]);
    assert_eq!(day_worked_minutes(&events), 480);
}

#[test]
fn official_departure_pauses_like_private() {
    let events = day_of(&[
        (EventType::WorkStart, 9, 0),
        (EventType::OfficialDeparture, 10, 0),
        (EventType::ReturnFromDeparture, 11, 0),
        (EventType::WorkEnd, 17, 0),
    ]);
    assert_eq!(day_worked_minutes(&events), 60 + 360);
}

#[test]
fn missing_work_start_counts_zero() {
    let events = day_of(&[(EventType::WorkEnd, 16, 0)]);
    assert_eq!(day_worked_minutes(&events), 0);
}

#[test]
fn missing_work_end_counts_zero() {
    let events = day_of(&[
        (EventType::WorkStart, 8, 0),
        (EventType::PrivateDeparture, 12, 0),
    ]);
    assert_eq!(day_worked_minutes(&events), 0);
}

#[test]
fn empty_day_counts_zero() {
    assert_eq!(day_worked_minutes(&[]), 0);
}

#[test]
fn leave_credits_full_quota_regardless_of_punches() {
    let events = day_of(&[(EventType::Leave, 0, 0)]);
    assert_eq!(day_worked_minutes(&events), FULL_DAY_MINUTES);

    // Even alongside an ordinary short day the leave wins.
    let events = day_of(&[
        (EventType::WorkStart, 8, 0),
        (EventType::WorkEnd, 9, 0),
        (EventType::Leave, 10, 0),
    ]);
    assert_eq!(day_worked_minutes(&events), FULL_DAY_MINUTES);
}

#[test]
fn unsorted_input_is_sorted_by_time() {
    let events = day_of(&[
        (EventType::WorkEnd, 16, 0),
        (EventType::ReturnFromDeparture, 12, 30),
        (EventType::WorkStart, 8, 0),
        (EventType::PrivateDeparture, 12, 0),
    ]);
    assert_eq!(day_worked_minutes(&events), 240 + 210);
}

#[test]
fn total_never_goes_negative() {
    // An end punch recorded before the start punch clamps at zero.
    let events = day_of(&[(EventType::WorkStart, 16, 0), (EventType::WorkEnd, 8, 0)]);
    assert_eq!(day_worked_minutes(&events), 0);
}
