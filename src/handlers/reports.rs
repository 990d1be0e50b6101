use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    handlers::work_event_utils::list_events,
    models::user::User,
    services::{
        holiday::{month_bounds, month_days, HolidayCalendar},
        worktime::{self, MonthlySummary},
    },
    types::OrganizationId,
};

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub organization_id: OrganizationId,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub is_workday: bool,
    pub holiday_name: Option<String>,
    pub worked_minutes: i64,
    pub balance_minutes: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    #[serde(flatten)]
    pub summary: MonthlySummary,
    pub days: Vec<DayReport>,
}

/// Monthly report: the balance against the quota plus a per-day breakdown.
pub async fn monthly_report(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<MonthlyReport>, AppError> {
    let (start, end) = month_bounds(query.year, query.month)
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".into()))?;

    let calendar = HolidayCalendar::load(&pool, start, end).await?;
    let events = list_events(&pool, user.id, query.organization_id, Some(start), Some(end)).await?;
    let events_by_day = worktime::group_by_day(events);

    let summary = worktime::monthly_summary(query.year, query.month, &events_by_day, &calendar)
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".into()))?;

    let mut days = Vec::new();
    for date in month_days(query.year, query.month)
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".into()))?
    {
        let worked_minutes = events_by_day
            .get(&date)
            .map(|day_events| worktime::day_worked_minutes(day_events))
            .unwrap_or(0);
        let is_workday = calendar.is_workday(date);
        days.push(DayReport {
            date,
            is_workday,
            holiday_name: calendar.holiday_name(date).map(str::to_owned),
            worked_minutes,
            balance_minutes: worktime::day_balance_minutes(worked_minutes, is_workday),
        });
    }

    Ok(Json(MonthlyReport { summary, days }))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_workday: bool,
    pub is_weekend: bool,
    pub holiday_name: Option<String>,
}

/// Workday calendar for one month, independent of any punches.
pub async fn monthly_calendar(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarDay>>, AppError> {
    let (start, end) = month_bounds(query.year, query.month)
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".into()))?;
    let calendar = HolidayCalendar::load(&pool, start, end).await?;

    let days = month_days(query.year, query.month)
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".into()))?
        .map(|date| CalendarDay {
            date,
            is_workday: calendar.is_workday(date),
            is_weekend: crate::services::holiday::is_weekend(date),
            holiday_name: calendar.holiday_name(date).map(str::to_owned),
        })
        .collect();

    Ok(Json(days))
}
