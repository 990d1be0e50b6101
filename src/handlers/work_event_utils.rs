//! Shared guards and queries for the work event handlers.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        membership::OrganizationMember,
        work_event::{EventType, WorkEvent},
    },
    types::{OrganizationId, UserId, WorkEventId},
};

/// Loads the caller's membership and requires it to be approved.
pub async fn ensure_approved_member(
    pool: &PgPool,
    user_id: UserId,
    organization_id: OrganizationId,
) -> Result<OrganizationMember, AppError> {
    let member = sqlx::query_as::<_, OrganizationMember>(
        "SELECT id, organization_id, user_id, role, status, created_at \
         FROM organization_members WHERE organization_id = $1 AND user_id = $2",
    )
    .bind(organization_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::Forbidden("You are not a member of this organization".into()))?;

    if !member.is_approved() {
        return Err(AppError::Forbidden(
            "Your membership has not been approved yet".into(),
        ));
    }

    Ok(member)
}

/// Rejects a second event of the same type on the same day.
pub async fn ensure_no_duplicate_event(
    pool: &PgPool,
    user_id: UserId,
    organization_id: OrganizationId,
    event_type: EventType,
    event_date: NaiveDate,
) -> Result<(), AppError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM work_events \
         WHERE user_id = $1 AND organization_id = $2 AND event_type = $3 AND event_date = $4",
    )
    .bind(user_id)
    .bind(organization_id)
    .bind(event_type.as_str())
    .bind(event_date)
    .fetch_one(pool)
    .await?;

    if count > 0 {
        return Err(AppError::Conflict(format!(
            "A {} event already exists for this day",
            event_type.label()
        )));
    }

    Ok(())
}

/// Loads an event and verifies the caller owns it.
pub async fn fetch_event_owned(
    pool: &PgPool,
    event_id: WorkEventId,
    user_id: UserId,
) -> Result<WorkEvent, AppError> {
    let event = sqlx::query_as::<_, WorkEvent>(
        "SELECT id, user_id, organization_id, event_type, event_date, event_time, created_at \
         FROM work_events WHERE id = $1",
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Work event not found".into()))?;

    if event.user_id != user_id {
        return Err(AppError::Forbidden(
            "You can only modify your own events".into(),
        ));
    }

    Ok(event)
}

pub async fn insert_event(pool: &PgPool, event: &WorkEvent) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO work_events \
         (id, user_id, organization_id, event_type, event_date, event_time, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(event.id)
    .bind(event.user_id)
    .bind(event.organization_id)
    .bind(event.event_type.as_str())
    .bind(event.event_date)
    .bind(event.event_time)
    .bind(event.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Lists a user's events for one organization, optionally bounded by date.
/// Newest day first, punches within a day in chronological order.
pub async fn list_events(
    pool: &PgPool,
    user_id: UserId,
    organization_id: OrganizationId,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<WorkEvent>, AppError> {
    let events = sqlx::query_as::<_, WorkEvent>(
        "SELECT id, user_id, organization_id, event_type, event_date, event_time, created_at \
         FROM work_events \
         WHERE user_id = $1 AND organization_id = $2 \
           AND ($3::date IS NULL OR event_date >= $3) \
           AND ($4::date IS NULL OR event_date <= $4) \
         ORDER BY event_date DESC, event_time ASC",
    )
    .bind(user_id)
    .bind(organization_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(events)
}

/// Events for a single day, in chronological order.
pub async fn list_events_for_day(
    pool: &PgPool,
    user_id: UserId,
    organization_id: OrganizationId,
    date: NaiveDate,
) -> Result<Vec<WorkEvent>, AppError> {
    let events = sqlx::query_as::<_, WorkEvent>(
        "SELECT id, user_id, organization_id, event_type, event_date, event_time, created_at \
         FROM work_events \
         WHERE user_id = $1 AND organization_id = $2 AND event_date = $3 \
         ORDER BY event_time ASC",
    )
    .bind(user_id)
    .bind(organization_id)
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(events)
}
