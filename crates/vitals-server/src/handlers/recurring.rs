//! Recurring transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse};
use vitals_core::{
    NewRecurringTransaction, RecurringTotals, RecurringTransaction, Transaction, TransactionType,
};

/// Query parameters for listing recurring transactions
#[derive(Debug, Default, Deserialize)]
pub struct RecurringQuery {
    /// Filter by type (income, expense)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Recurring transactions plus the monthly cash flow of the whole schedule
#[derive(Serialize)]
pub struct RecurringResponse {
    pub items: Vec<RecurringTransaction>,
    pub totals: RecurringTotals,
}

/// Result of posting a due occurrence
#[derive(Serialize)]
pub struct PostedRecurring {
    pub transaction: Transaction,
    pub recurring: RecurringTransaction,
}

/// GET /api/users/:user_id/recurring - List by next due date
pub async fn list_recurring(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<RecurringQuery>,
) -> Result<Json<RecurringResponse>, AppError> {
    if state.store.get_profile(&user_id)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let kind = match params.kind.as_deref() {
        None | Some("") | Some("all") => None,
        Some(k) => Some(k.parse::<TransactionType>().map_err(|e| AppError::bad_request(&e))?),
    };

    let items = state.store.list_recurring(&user_id, kind)?;
    let totals = state.store.recurring_totals(&user_id)?;
    Ok(Json(RecurringResponse { items, totals }))
}

/// POST /api/users/:user_id/recurring - Schedule a recurring transaction
pub async fn create_recurring(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<NewRecurringTransaction>,
) -> Result<Json<RecurringTransaction>, AppError> {
    let recurring = state.store.add_recurring(&user_id, body)?;
    Ok(Json(recurring))
}

/// POST /api/recurring/:id/post - Record the due occurrence and advance the schedule
pub async fn post_recurring(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostedRecurring>, AppError> {
    let (transaction, recurring) = state.store.post_recurring(id)?;
    Ok(Json(PostedRecurring {
        transaction,
        recurring,
    }))
}

/// DELETE /api/recurring/:id - Delete a recurring transaction
pub async fn delete_recurring(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete_recurring(id)?;
    Ok(Json(SuccessResponse { success: true }))
}
