use axum::{extract::State, http::StatusCode, Json};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse},
    utils::{
        jwt::create_access_token,
        password::{hash_password, verify_password},
    },
};

pub async fn register(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let existing = find_user_by_email(&pool, &payload.email).await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email is already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.email, password_hash, payload.full_name.trim().into());

    sqlx::query(
        "INSERT INTO users (id, email, password_hash, full_name, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.full_name)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State((pool, config)): State<(PgPool, Config)>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = find_user_by_email(&pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".into()))?;

    let matches = verify_password(&payload.password, &user.password_hash)?;
    if !matches {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let access_token = create_access_token(
        user.id.to_string(),
        user.email.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;

    Ok(Json(LoginResponse {
        access_token,
        user: UserResponse::from(user),
    }))
}

async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    Ok(sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, full_name, created_at, updated_at \
         FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?)
}
