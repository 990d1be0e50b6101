//! Worktime arithmetic: daily worked minutes, work status, and monthly
//! balances computed from a user's punch events.

use crate::models::work_event::{EventType, WorkEvent};
use crate::services::holiday::{month_days, HolidayCalendar};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Daily quota for a full workday, in minutes (8 hours).
pub const FULL_DAY_MINUTES: i64 = 480;

/// Computes worked minutes for one day's events.
///
/// Time accumulates between a start marker (`work_start`,
/// `return_from_departure`) and the next stop marker (`work_end`,
/// `official_departure`, `private_departure`). A `leave` event credits the
/// fixed full-day quota regardless of any punches. Days missing either a
/// `work_start` or a `work_end` count zero, and negative totals clamp to
/// zero.
pub fn day_worked_minutes(day_events: &[WorkEvent]) -> i64 {
    if day_events.iter().any(|e| e.event_type == EventType::Leave) {
        return FULL_DAY_MINUTES;
    }

    let mut sorted: Vec<&WorkEvent> = day_events.iter().collect();
    sorted.sort_by_key(|e| e.event_time);

    let mut current_start = match sorted.iter().find(|e| e.event_type == EventType::WorkStart) {
        Some(event) => event.event_time,
        None => return 0,
    };
    if !sorted.iter().any(|e| e.event_type == EventType::WorkEnd) {
        return 0;
    }

    let mut minutes = 0i64;
    for event in sorted {
        if event.event_type.is_start_marker() {
            current_start = event.event_time;
        } else if event.event_type.is_stop_marker() {
            minutes += (event.event_time - current_start).num_minutes();
        }
    }

    minutes.max(0)
}

/// Signed day balance as shown in the report: against the quota on workdays,
/// pure surplus otherwise.
pub fn day_balance_minutes(worked_minutes: i64, is_workday: bool) -> i64 {
    if is_workday {
        worked_minutes - FULL_DAY_MINUTES
    } else {
        worked_minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    NotStarted,
    Working,
    OfficialLeave,
    PrivateLeave,
    Finished,
    OnLeave,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::NotStarted => "not_started",
            WorkStatus::Working => "working",
            WorkStatus::OfficialLeave => "official_leave",
            WorkStatus::PrivateLeave => "private_leave",
            WorkStatus::Finished => "finished",
            WorkStatus::OnLeave => "on_leave",
        }
    }
}

/// Derives the current work status from one day's events.
pub fn work_status(day_events: &[WorkEvent]) -> WorkStatus {
    if day_events.iter().any(|e| e.event_type == EventType::Leave) {
        return WorkStatus::OnLeave;
    }

    let last = day_events.iter().max_by_key(|e| e.event_time);
    match last.map(|e| e.event_type) {
        None => WorkStatus::NotStarted,
        Some(EventType::WorkStart) | Some(EventType::ReturnFromDeparture) => WorkStatus::Working,
        Some(EventType::WorkEnd) => WorkStatus::Finished,
        Some(EventType::OfficialDeparture) => WorkStatus::OfficialLeave,
        Some(EventType::PrivateDeparture) => WorkStatus::PrivateLeave,
        Some(EventType::Leave) => WorkStatus::OnLeave,
    }
}

/// Groups events by date, each day's events ordered by time.
pub fn group_by_day(events: Vec<WorkEvent>) -> BTreeMap<NaiveDate, Vec<WorkEvent>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<WorkEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.event_date).or_default().push(event);
    }
    for day_events in grouped.values_mut() {
        day_events.sort_by_key(|e| e.event_time);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub worked_minutes: i64,
    pub required_minutes: i64,
    pub balance_minutes: i64,
    pub workday_count: u32,
}

/// Monthly balance: worked minutes on workdays minus the full-day quota for
/// every workday of the month. Returns `None` for an invalid year/month.
pub fn monthly_summary(
    year: i32,
    month: u32,
    events_by_day: &BTreeMap<NaiveDate, Vec<WorkEvent>>,
    calendar: &HolidayCalendar,
) -> Option<MonthlySummary> {
    let mut worked_minutes = 0i64;
    let mut required_minutes = 0i64;
    let mut workday_count = 0u32;

    for date in month_days(year, month)? {
        if !calendar.is_workday(date) {
            continue;
        }
        required_minutes += FULL_DAY_MINUTES;
        workday_count += 1;
        if let Some(day_events) = events_by_day.get(&date) {
            worked_minutes += day_worked_minutes(day_events);
        }
    }

    Some(MonthlySummary {
        year,
        month,
        worked_minutes,
        required_minutes,
        balance_minutes: worked_minutes - required_minutes,
        workday_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrganizationId, UserId};
    use chrono::NaiveTime;

    fn event(event_type: EventType, hh: u32, mm: u32) -> WorkEvent {
        WorkEvent::new(
            UserId::new(),
            OrganizationId::new(),
            event_type,
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            NaiveTime::from_hms_opt(hh, mm, 0).unwrap(),
        )
    }

    #[test]
    fn status_empty_day_is_not_started() {
        assert_eq!(work_status(&[]), WorkStatus::NotStarted);
    }

    #[test]
    fn status_follows_last_event() {
        let events = vec![
            event(EventType::WorkStart, 8, 0),
            event(EventType::OfficialDeparture, 10, 0),
        ];
        assert_eq!(work_status(&events), WorkStatus::OfficialLeave);

        let events = vec![
            event(EventType::WorkStart, 8, 0),
            event(EventType::PrivateDeparture, 10, 0),
            event(EventType::ReturnFromDeparture, 11, 0),
        ];
        assert_eq!(work_status(&events), WorkStatus::Working);

        let events = vec![
            event(EventType::WorkStart, 8, 0),
            event(EventType::WorkEnd, 16, 0),
        ];
        assert_eq!(work_status(&events), WorkStatus::Finished);
    }

    #[test]
    fn status_leave_wins_over_other_events() {
        let events = vec![
            event(EventType::WorkStart, 8, 0),
            event(EventType::Leave, 9, 0),
            event(EventType::WorkEnd, 16, 0),
        ];
        assert_eq!(work_status(&events), WorkStatus::OnLeave);
    }

    #[test]
    fn day_balance_against_quota_only_on_workdays() {
        assert_eq!(day_balance_minutes(480, true), 0);
        assert_eq!(day_balance_minutes(450, true), -30);
        assert_eq!(day_balance_minutes(120, false), 120);
    }

    #[test]
    fn group_by_day_sorts_each_day_by_time() {
        let mut late = event(EventType::WorkEnd, 16, 30);
        let mut early = event(EventType::WorkStart, 8, 0);
        late.event_date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        early.event_date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();

        let grouped = group_by_day(vec![late, early]);
        let day = grouped
            .get(&NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
            .unwrap();
        assert_eq!(day[0].event_type, EventType::WorkStart);
        assert_eq!(day[1].event_type, EventType::WorkEnd);
    }
}
