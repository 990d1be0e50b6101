//! Import of the national holiday list from the third-party API.
//!
//! Runs once per year: if the holiday table already has rows for the current
//! year the import is skipped, otherwise the full year is fetched and
//! inserted. The fetch retries a fixed number of times with a fixed delay.

use crate::models::holiday::NewHoliday;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::time::Duration;

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum HolidayImportError {
    #[error("holiday API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("holiday API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid holiday payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not fetch holidays after {0} attempts")]
    RetriesExhausted(u32),
}

#[derive(Debug, Deserialize)]
struct ApiHoliday {
    #[serde(default)]
    name: String,
    /// The API marks moved working days (weekday-swap Saturdays) with this.
    #[serde(default, rename = "isPunishmentDay")]
    is_punishment_day: bool,
}

/// Parses the API payload: a JSON object keyed by ISO date.
pub fn parse_holiday_payload(body: &str) -> Result<Vec<NewHoliday>, HolidayImportError> {
    let raw: BTreeMap<NaiveDate, ApiHoliday> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .map(|(date, info)| NewHoliday {
            date,
            name: info.name,
            is_workday: info.is_punishment_day,
        })
        .collect())
}

/// Fetches one year of holidays, retrying transient failures.
pub async fn fetch_holidays(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    year: i32,
) -> Result<Vec<NewHoliday>, HolidayImportError> {
    let url = format!(
        "{}/{}/?apikey={}",
        base_url.trim_end_matches('/'),
        year,
        api_key
    );

    for attempt in 1..=MAX_RETRIES {
        match try_fetch(client, &url).await {
            Ok(holidays) => return Ok(holidays),
            Err(err) => {
                tracing::warn!(attempt, error = %err, "holiday fetch attempt failed");
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    Err(HolidayImportError::RetriesExhausted(MAX_RETRIES))
}

async fn try_fetch(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<NewHoliday>, HolidayImportError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(HolidayImportError::Status { status, body });
    }

    parse_holiday_payload(&body)
}

/// Number of holiday rows already stored for the given year.
pub async fn count_for_year(pool: &PgPool, year: i32) -> sqlx::Result<i64> {
    let (from, to) = year_bounds(year)?;
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM holidays WHERE date >= $1 AND date <= $2")
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Inserts the fetched holidays, skipping dates already present.
pub async fn insert_holidays(pool: &PgPool, holidays: &[NewHoliday]) -> sqlx::Result<u64> {
    let mut inserted = 0u64;
    for holiday in holidays {
        let result = sqlx::query(
            "INSERT INTO holidays (id, date, name, is_workday, created_at) \
             VALUES ($1, $2, $3, $4, NOW()) \
             ON CONFLICT (date) DO NOTHING",
        )
        .bind(crate::types::HolidayId::new())
        .bind(holiday.date)
        .bind(&holiday.name)
        .bind(holiday.is_workday)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

fn year_bounds(year: i32) -> sqlx::Result<(NaiveDate, NaiveDate)> {
    let from = NaiveDate::from_ymd_opt(year, 1, 1);
    let to = NaiveDate::from_ymd_opt(year, 12, 31);
    match (from, to) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(sqlx::Error::Protocol(format!("invalid year: {}", year))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_maps_dates_and_flags() {
        let body = r#"{
            "2025-03-15": {"name": "Nemzeti ünnep", "isPunishmentDay": false},
            "2025-05-17": {"name": "Áthelyezett munkanap", "isPunishmentDay": true}
        }"#;
        let holidays = parse_holiday_payload(body).unwrap();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].name, "Nemzeti ünnep");
        assert!(!holidays[0].is_workday);
        assert!(holidays[1].is_workday);
    }

    #[test]
    fn parse_defaults_missing_fields() {
        let body = r#"{"2025-12-25": {}}"#;
        let holidays = parse_holiday_payload(body).unwrap();
        assert_eq!(holidays[0].name, "");
        assert!(!holidays[0].is_workday);
    }

    #[test]
    fn parse_rejects_malformed_payload() {
        assert!(parse_holiday_payload("not json").is_err());
        assert!(parse_holiday_payload(r#"{"not-a-date": {}}"#).is_err());
    }

    #[test]
    fn year_bounds_cover_full_year() {
        let (from, to) = year_bounds(2025).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
