use crate::types::{MembershipId, OrganizationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Approved => "approved",
            MembershipStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Admin,
    User,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// A user's membership in an organization; joins wait for approval.
pub struct OrganizationMember {
    pub id: MembershipId,
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

impl OrganizationMember {
    pub fn new(
        organization_id: OrganizationId,
        user_id: UserId,
        role: MemberRole,
        status: MembershipStatus,
    ) -> Self {
        Self {
            id: MembershipId::new(),
            organization_id,
            user_id,
            role,
            status,
            created_at: Utc::now(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == MembershipStatus::Approved
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub id: MembershipId,
    pub organization_id: OrganizationId,
    pub role: MemberRole,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

impl From<OrganizationMember> for MembershipResponse {
    fn from(member: OrganizationMember) -> Self {
        Self {
            id: member.id,
            organization_id: member.organization_id,
            role: member.role,
            status: member.status,
            created_at: member.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_status_serde_snake_case() {
        let s: MembershipStatus = serde_json::from_str("\"approved\"").unwrap();
        assert!(matches!(s, MembershipStatus::Approved));
        let v = serde_json::to_value(MembershipStatus::Pending).unwrap();
        assert_eq!(v, serde_json::json!("pending"));
    }

    #[test]
    fn new_membership_carries_given_status() {
        let member = OrganizationMember::new(
            OrganizationId::new(),
            UserId::new(),
            MemberRole::Admin,
            MembershipStatus::Approved,
        );
        assert!(member.is_approved());
        assert_eq!(member.role, MemberRole::Admin);
    }
}
