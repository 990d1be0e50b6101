//! Holiday calendar: decides which dates count as workdays.

use chrono::{Datelike, NaiveDate, Weekday};
use sqlx::PgPool;
use std::collections::HashMap;

/// In-memory view of the holiday table for some date window.
///
/// Rest days (`is_workday = false`) remove a weekday from the required-time
/// total. Moved working days (`is_workday = true`) are kept only for display;
/// they never turn a weekend into a workday.
#[derive(Debug, Default, Clone)]
pub struct HolidayCalendar {
    rest_days: HashMap<NaiveDate, String>,
    moved_workdays: HashMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, String, bool)>,
    {
        let mut calendar = Self::default();
        for (date, name, is_workday) in entries {
            if is_workday {
                calendar.moved_workdays.insert(date, name);
            } else {
                calendar.rest_days.insert(date, name);
            }
        }
        calendar
    }

    /// Loads all holiday rows intersecting the inclusive date range.
    pub async fn load(pool: &PgPool, from: NaiveDate, to: NaiveDate) -> sqlx::Result<Self> {
        let rows: Vec<(NaiveDate, String, bool)> = sqlx::query_as(
            "SELECT date, name, is_workday FROM holidays WHERE date >= $1 AND date <= $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(Self::from_entries(rows))
    }

    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.rest_days.contains_key(&date)
    }

    /// Name of the holiday entry on this date, if any (either kind).
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.rest_days
            .get(&date)
            .or_else(|| self.moved_workdays.get(&date))
            .map(String::as_str)
    }

    /// A workday is a weekday that is not a flagged rest day.
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        if is_weekend(date) {
            return false;
        }
        !self.is_rest_day(date)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First day of the month and the exclusive first day of the next month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;

    Some((start, end))
}

/// Iterates every date of the given month.
pub fn month_days(year: i32, month: u32) -> Option<impl Iterator<Item = NaiveDate>> {
    let (start, end) = month_bounds(year, month)?;
    Some(start.iter_days().take_while(move |d| *d < end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds_returns_correct_range() {
        let (start, end) = month_bounds(2024, 1).unwrap();
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 2, 1));
    }

    #[test]
    fn month_bounds_handles_december() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2025, 1, 1));
    }

    #[test]
    fn month_bounds_invalid_month_returns_none() {
        assert!(month_bounds(2024, 13).is_none());
        assert!(month_bounds(2024, 0).is_none());
    }

    #[test]
    fn month_days_covers_whole_month() {
        let days: Vec<_> = month_days(2024, 2).unwrap().collect();
        assert_eq!(days.len(), 29); // leap year
        assert_eq!(days[0], date(2024, 2, 1));
        assert_eq!(days[28], date(2024, 2, 29));
    }

    #[test]
    fn weekday_without_holiday_is_workday() {
        let calendar = HolidayCalendar::default();
        assert!(calendar.is_workday(date(2025, 3, 4))); // Tuesday
    }

    #[test]
    fn weekend_is_never_workday() {
        let calendar = HolidayCalendar::default();
        assert!(!calendar.is_workday(date(2025, 3, 1))); // Saturday
        assert!(!calendar.is_workday(date(2025, 3, 2))); // Sunday
    }

    #[test]
    fn rest_day_holiday_removes_weekday() {
        let holiday = date(2025, 3, 15); // Saturday, but also test a weekday
        let weekday_holiday = date(2025, 12, 25); // Thursday
        let calendar = HolidayCalendar::from_entries(vec![
            (holiday, "Nemzeti ünnep".to_string(), false),
            (weekday_holiday, "Karácsony".to_string(), false),
        ]);
        assert!(!calendar.is_workday(weekday_holiday));
        assert_eq!(calendar.holiday_name(weekday_holiday), Some("Karácsony"));
    }

    #[test]
    fn moved_working_day_does_not_unlock_weekend() {
        // A flagged working Saturday still falls on a weekend, so the
        // weekday rule wins.
        let saturday = date(2025, 5, 17);
        let calendar =
            HolidayCalendar::from_entries(vec![(saturday, "munkanap".to_string(), true)]);
        assert!(!calendar.is_workday(saturday));
        assert_eq!(calendar.holiday_name(saturday), Some("munkanap"));
    }

    #[test]
    fn moved_working_day_on_weekday_stays_workday() {
        let weekday = date(2025, 5, 2); // Friday flagged as working day
        let calendar =
            HolidayCalendar::from_entries(vec![(weekday, "munkanap".to_string(), true)]);
        assert!(calendar.is_workday(weekday));
    }
}
