//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use vitals_core::{Budget, BudgetOverview, BudgetUpdate, NewBudget};

/// GET /api/users/:user_id/budgets - Budgets with spending against each
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<BudgetOverview>, AppError> {
    if state.store.get_profile(&user_id)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let overview = state.store.budget_overview(&user_id)?;
    Ok(Json(overview))
}

/// POST /api/users/:user_id/budgets - Create a budget
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<NewBudget>,
) -> Result<Json<Budget>, AppError> {
    let budget = state.store.add_budget(&user_id, body)?;
    Ok(Json(budget))
}

/// PATCH /api/budgets/:id - Change a budget's category, amount, or period
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<BudgetUpdate>,
) -> Result<Json<Budget>, AppError> {
    let budget = state.store.update_budget(id, body)?;
    Ok(Json(budget))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete_budget(id)?;
    Ok(Json(SuccessResponse { success: true }))
}
