//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use vitals_core::{Goal, NewGoal};

/// Query parameters for listing goals
#[derive(Debug, Deserialize)]
pub struct GoalQuery {
    /// Completed goals are listed unless this is `false`
    #[serde(default = "default_include_completed")]
    pub include_completed: bool,
}

fn default_include_completed() -> bool {
    true
}

/// Request body for recording goal progress
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    /// Amount to add to the goal's current amount
    pub amount: f64,
}

/// GET /api/users/:user_id/goals - List goals by deadline
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<GoalQuery>,
) -> Result<Json<Vec<Goal>>, AppError> {
    if state.store.get_profile(&user_id)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let goals = state
        .store
        .list_goals(&user_id, params.include_completed)?;
    Ok(Json(goals))
}

/// GET /api/goals/:id - Get a single goal
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, AppError> {
    let goal = state
        .store
        .get_goal(id)?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;
    Ok(Json(goal))
}

/// POST /api/users/:user_id/goals - Create a goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<NewGoal>,
) -> Result<Json<Goal>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("Goal name is required"));
    }

    let goal = state.store.add_goal(&user_id, body)?;
    Ok(Json(goal))
}

/// POST /api/goals/:id/progress - Add to a goal's current amount
pub async fn update_goal_progress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<ProgressRequest>,
) -> Result<Json<Goal>, AppError> {
    let goal = state.store.update_goal_progress(id, body.amount)?;
    Ok(Json(goal))
}

/// DELETE /api/goals/:id - Delete a goal
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete_goal(id)?;
    Ok(Json(SuccessResponse { success: true }))
}
