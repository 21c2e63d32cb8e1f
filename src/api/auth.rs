use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::MessageResponse;
use crate::api::extract::ApiJson;
use crate::api::server::AppState;
use crate::db::models::{NewUser, UserType};
use crate::db::repo;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub user_type: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user_id: i64,
    pub user_type: UserType,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let user_type: UserType = payload
        .user_type
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("user_type: {e}")))?;

    if repo::get_user_by_phone(&state.db, &payload.phone).await?.is_some() {
        return Err(ApiError::PhoneTaken);
    }

    let new_user = NewUser {
        name: payload.name,
        phone: payload.phone,
        user_type,
        password_hash: hash_password(&payload.password)?,
    };

    // A concurrent registration can pass the check above; the UNIQUE
    // constraint still rejects the second insert.
    let user_id = repo::insert_user(&state.db, &new_user)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ApiError::PhoneTaken,
            other => ApiError::Database(other),
        })?;

    tracing::info!("Registered {} {} as user {}", user_type, new_user.phone, user_id);

    Ok(Json(MessageResponse::new("User registered successfully")))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = repo::get_user_by_phone(&state.db, &payload.phone)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!("Login successful for user {}", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful",
        user_id: user.id,
        user_type: user.user_type,
    }))
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
