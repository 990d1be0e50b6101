//! Work events: the punch records everything else is computed from.

use crate::types::{OrganizationId, UserId, WorkEventId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    WorkStart,
    WorkEnd,
    OfficialDeparture,
    PrivateDeparture,
    ReturnFromDeparture,
    Leave,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::WorkStart => "work_start",
            EventType::WorkEnd => "work_end",
            EventType::OfficialDeparture => "official_departure",
            EventType::PrivateDeparture => "private_departure",
            EventType::ReturnFromDeparture => "return_from_departure",
            EventType::Leave => "leave",
        }
    }

    /// Human-readable label used in error messages ("work start", ...).
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Start markers open a counted interval.
    pub fn is_start_marker(&self) -> bool {
        matches!(self, EventType::WorkStart | EventType::ReturnFromDeparture)
    }

    /// Stop markers close the currently open interval.
    pub fn is_stop_marker(&self) -> bool {
        matches!(
            self,
            EventType::WorkEnd | EventType::OfficialDeparture | EventType::PrivateDeparture
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkEvent {
    pub id: WorkEventId,
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl WorkEvent {
    pub fn new(
        user_id: UserId,
        organization_id: OrganizationId,
        event_type: EventType,
        event_date: NaiveDate,
        event_time: NaiveTime,
    ) -> Self {
        Self {
            id: WorkEventId::new(),
            user_id,
            organization_id,
            event_type,
            event_date,
            event_time,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordEventRequest {
    pub organization_id: OrganizationId,
    pub event_type: EventType,
    /// Defaults to today in the configured timezone.
    pub event_date: Option<NaiveDate>,
    /// Defaults to the current wall-clock time in the configured timezone.
    pub event_time: Option<NaiveTime>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub event_type: Option<EventType>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkEventResponse {
    pub id: WorkEventId,
    pub organization_id: OrganizationId,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl From<WorkEvent> for WorkEventResponse {
    fn from(event: WorkEvent) -> Self {
        Self {
            id: event.id,
            organization_id: event.organization_id,
            event_type: event.event_type,
            event_date: event.event_date,
            event_time: event.event_time,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_serde_snake_case() {
        let t: EventType = serde_json::from_str("\"return_from_departure\"").unwrap();
        assert!(matches!(t, EventType::ReturnFromDeparture));
        let v = serde_json::to_value(EventType::OfficialDeparture).unwrap();
        assert_eq!(v, serde_json::json!("official_departure"));
    }

    #[test]
    fn event_type_markers_partition_correctly() {
        assert!(EventType::WorkStart.is_start_marker());
        assert!(EventType::ReturnFromDeparture.is_start_marker());
        assert!(EventType::WorkEnd.is_stop_marker());
        assert!(EventType::OfficialDeparture.is_stop_marker());
        assert!(EventType::PrivateDeparture.is_stop_marker());
        assert!(!EventType::Leave.is_start_marker());
        assert!(!EventType::Leave.is_stop_marker());
    }

    #[test]
    fn event_type_label_replaces_underscores() {
        assert_eq!(EventType::WorkStart.label(), "work start");
    }
}
