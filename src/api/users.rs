use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::error::log_failure;
use super::extract::{ApiJson, ApiPath};
use crate::api::{ApiError, AppState};
use crate::db::User;
use crate::services::{CreateUserRequest, UpdateUserRequest};

/// `POST /api/users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .users()
        .create_user(payload)
        .await
        .inspect_err(log_failure("Error creating user"))?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT|PATCH /api/users/{username}`
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiPath(username): ApiPath<String>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users()
        .update_user(&username, payload)
        .await
        .inspect_err(log_failure("Error updating user"))?;
    Ok(Json(user))
}

/// `GET /api/users/{username}`
pub async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users()
        .get_by_username(&username)
        .await
        .inspect_err(log_failure("Error fetching user by username"))?;
    Ok(Json(user))
}

/// `GET /api/users/email/{email}`
pub async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users()
        .get_by_email(&email)
        .await
        .inspect_err(log_failure("Error fetching user by email"))?;
    Ok(Json(user))
}

/// `GET /api/users/role/{role}`
pub async fn get_users_by_role(
    State(state): State<Arc<AppState>>,
    ApiPath(role): ApiPath<String>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users()
        .get_by_role(&role)
        .await
        .inspect_err(log_failure("Error fetching user by role"))?;
    Ok(Json(users))
}
