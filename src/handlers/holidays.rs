use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::holiday::{Holiday, HolidayResponse},
};

#[derive(Debug, Deserialize)]
pub struct ListHolidaysQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn list_holidays(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(query): Query<ListHolidaysQuery>,
) -> Result<Json<Vec<HolidayResponse>>, AppError> {
    let holidays = sqlx::query_as::<_, Holiday>(
        "SELECT id, date, name, is_workday, created_at FROM holidays \
         WHERE ($1::date IS NULL OR date >= $1) \
           AND ($2::date IS NULL OR date <= $2) \
         ORDER BY date ASC",
    )
    .bind(query.from)
    .bind(query.to)
    .fetch_all(&pool)
    .await?;

    Ok(Json(
        holidays.into_iter().map(HolidayResponse::from).collect(),
    ))
}
