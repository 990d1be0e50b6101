use crate::types::HolidayId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// A row of the national holiday table.
///
/// `is_workday = false` marks a rest day. `is_workday = true` marks a moved
/// working day (a Saturday that swaps with a bridged weekday).
pub struct Holiday {
    pub id: HolidayId,
    pub date: NaiveDate,
    pub name: String,
    pub is_workday: bool,
    pub created_at: DateTime<Utc>,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: String, is_workday: bool) -> Self {
        Self {
            id: HolidayId::new(),
            date,
            name,
            is_workday,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Holiday data as fetched from the national holiday API, before insert.
pub struct NewHoliday {
    pub date: NaiveDate,
    pub name: String,
    pub is_workday: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub id: HolidayId,
    pub date: NaiveDate,
    pub name: String,
    pub is_workday: bool,
}

impl From<Holiday> for HolidayResponse {
    fn from(holiday: Holiday) -> Self {
        Self {
            id: holiday.id,
            date: holiday.date,
            name: holiday.name,
            is_workday: holiday.is_workday,
        }
    }
}
