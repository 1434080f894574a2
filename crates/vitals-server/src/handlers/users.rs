//! User profile handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use vitals_core::{FinancialSnapshot, ProfileUpdate, UserProfile};

/// Request body for creating a profile
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
}

/// POST /api/users - Initialize a profile (returns the existing one if present)
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .store
        .initialize_profile(&body.user_id, &body.display_name, &body.email)?;
    Ok(Json(profile))
}

/// GET /api/users/:user_id - Get a profile
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .store
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(profile))
}

/// PATCH /api/users/:user_id - Update display name, email, settings or savings
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.store.update_profile(&user_id, body)?;
    Ok(Json(profile))
}

/// GET /api/users/:user_id/snapshot - Current financial summary
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<FinancialSnapshot>, AppError> {
    let profile = state
        .store
        .get_profile(&user_id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(profile.financial_summary))
}
