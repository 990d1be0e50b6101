use crate::types::OrganizationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub address: String,
    /// Contact fields for the organization's leader.
    pub leader_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(
        name: String,
        address: String,
        leader_name: String,
        email: String,
        phone: String,
    ) -> Self {
        Self {
            id: OrganizationId::new(),
            name,
            address,
            leader_name,
            email,
            phone,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(custom(function = "crate::validation::rules::validate_name"))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub address: String,
    #[validate(custom(function = "crate::validation::rules::validate_name"))]
    pub leader_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "crate::validation::rules::validate_phone"))]
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: OrganizationId,
    pub name: String,
    pub address: String,
    pub leader_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            address: org.address,
            leader_name: org.leader_name,
            email: org.email,
            phone: org.phone,
            created_at: org.created_at,
        }
    }
}
