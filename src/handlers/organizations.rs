use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        membership::{MemberRole, MembershipResponse, MembershipStatus, OrganizationMember},
        organization::{CreateOrganizationRequest, Organization, OrganizationResponse},
        user::User,
    },
    types::OrganizationId,
};

pub async fn list_organizations(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<OrganizationResponse>>, AppError> {
    let organizations = sqlx::query_as::<_, Organization>(
        "SELECT id, name, address, leader_name, email, phone, created_at \
         FROM organizations ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(
        organizations
            .into_iter()
            .map(OrganizationResponse::from)
            .collect(),
    ))
}

/// Creates an organization; the creator becomes its approved admin.
pub async fn create_organization(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationResponse>), AppError> {
    payload.validate()?;

    let organization = Organization::new(
        payload.name.trim().into(),
        payload.address.trim().into(),
        payload.leader_name.trim().into(),
        payload.email,
        payload.phone,
    );
    let membership = OrganizationMember::new(
        organization.id,
        user.id,
        MemberRole::Admin,
        MembershipStatus::Approved,
    );

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO organizations (id, name, address, leader_name, email, phone, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(organization.id)
    .bind(&organization.name)
    .bind(&organization.address)
    .bind(&organization.leader_name)
    .bind(&organization.email)
    .bind(&organization.phone)
    .bind(organization.created_at)
    .execute(&mut *tx)
    .await?;

    insert_membership(&mut tx, &membership).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(OrganizationResponse::from(organization)),
    ))
}

/// Applies for membership; the request stays pending until an admin decides.
pub async fn apply_to_organization(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(organization_id): Path<OrganizationId>,
) -> Result<(StatusCode, Json<MembershipResponse>), AppError> {
    let exists: Option<(OrganizationId,)> =
        sqlx::query_as("SELECT id FROM organizations WHERE id = $1")
            .bind(organization_id)
            .fetch_optional(&pool)
            .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Organization not found".into()));
    }

    let existing: Option<(MembershipStatus,)> = sqlx::query_as(
        "SELECT status FROM organization_members WHERE organization_id = $1 AND user_id = $2",
    )
    .bind(organization_id)
    .bind(user.id)
    .fetch_optional(&pool)
    .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have already applied to this organization".into(),
        ));
    }

    let membership = OrganizationMember::new(
        organization_id,
        user.id,
        MemberRole::User,
        MembershipStatus::Pending,
    );

    let mut tx = pool.begin().await?;
    insert_membership(&mut tx, &membership).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse::from(membership)),
    ))
}

pub async fn list_my_memberships(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<MembershipResponse>>, AppError> {
    let memberships = sqlx::query_as::<_, OrganizationMember>(
        "SELECT id, organization_id, user_id, role, status, created_at \
         FROM organization_members WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(
        memberships.into_iter().map(MembershipResponse::from).collect(),
    ))
}

async fn insert_membership(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    membership: &OrganizationMember,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO organization_members (id, organization_id, user_id, role, status, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(membership.id)
    .bind(membership.organization_id)
    .bind(membership.user_id)
    .bind(membership.role.as_str())
    .bind(membership.status.as_str())
    .bind(membership.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
