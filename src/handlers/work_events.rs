use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    handlers::work_event_utils::{
        ensure_approved_member, ensure_no_duplicate_event, fetch_event_owned, insert_event,
        list_events, list_events_for_day,
    },
    models::{
        user::User,
        work_event::{RecordEventRequest, UpdateEventRequest, WorkEvent, WorkEventResponse},
    },
    services::worktime::{self, WorkStatus},
    types::{OrganizationId, WorkEventId},
    utils::time::{time_local, today_local},
};

/// Records a punch. Date and time default to "now" in the configured
/// timezone; one event of each type per user, organization and day.
pub async fn record_event(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Json(payload): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<WorkEventResponse>), AppError> {
    ensure_approved_member(&pool, user.id, payload.organization_id).await?;

    let event_date = payload
        .event_date
        .unwrap_or_else(|| today_local(&config.time_zone));
    let event_time = payload
        .event_time
        .unwrap_or_else(|| time_local(&config.time_zone));

    ensure_no_duplicate_event(
        &pool,
        user.id,
        payload.organization_id,
        payload.event_type,
        event_date,
    )
    .await?;

    let event = WorkEvent::new(
        user.id,
        payload.organization_id,
        payload.event_type,
        event_date,
        event_time,
    );
    insert_event(&pool, &event).await?;

    Ok((StatusCode::CREATED, Json(WorkEventResponse::from(event))))
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub organization_id: OrganizationId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn list_my_events(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<WorkEventResponse>>, AppError> {
    let events = list_events(&pool, user.id, query.organization_id, query.from, query.to).await?;
    Ok(Json(
        events.into_iter().map(WorkEventResponse::from).collect(),
    ))
}

pub async fn update_event(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(event_id): Path<WorkEventId>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<WorkEventResponse>, AppError> {
    let mut event = fetch_event_owned(&pool, event_id, user.id).await?;

    if let Some(event_type) = payload.event_type {
        event.event_type = event_type;
    }
    if let Some(event_date) = payload.event_date {
        event.event_date = event_date;
    }
    if let Some(event_time) = payload.event_time {
        event.event_time = event_time;
    }

    sqlx::query(
        "UPDATE work_events SET event_type = $2, event_date = $3, event_time = $4 WHERE id = $1",
    )
    .bind(event.id)
    .bind(event.event_type.as_str())
    .bind(event.event_date)
    .bind(event.event_time)
    .execute(&pool)
    .await?;

    Ok(Json(WorkEventResponse::from(event)))
}

pub async fn delete_event(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(event_id): Path<WorkEventId>,
) -> Result<StatusCode, AppError> {
    let event = fetch_event_owned(&pool, event_id, user.id).await?;

    sqlx::query("DELETE FROM work_events WHERE id = $1")
        .bind(event.id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub organization_id: OrganizationId,
    /// Defaults to today in the configured timezone.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct WorkStatusResponse {
    pub date: NaiveDate,
    pub status: WorkStatus,
    pub worked_minutes: i64,
    pub events: Vec<WorkEventResponse>,
}

/// Current work status for one day, derived from the day's last punch.
pub async fn work_status(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<WorkStatusResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| today_local(&config.time_zone));
    let events = list_events_for_day(&pool, user.id, query.organization_id, date).await?;

    Ok(Json(WorkStatusResponse {
        date,
        status: worktime::work_status(&events),
        worked_minutes: worktime::day_worked_minutes(&events),
        events: events.into_iter().map(WorkEventResponse::from).collect(),
    }))
}
