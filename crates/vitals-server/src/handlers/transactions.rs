//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vitals_core::{NewTransaction, Transaction, TransactionFilter, TransactionType};

/// Query parameters for listing transactions
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    /// Filter by type (income, expense)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionQuery {
    fn into_filter(self) -> Result<TransactionFilter, AppError> {
        let kind = self
            .kind
            .map(|k| k.parse::<TransactionType>())
            .transpose()
            .map_err(|e| AppError::bad_request(&e))?;

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AppError::bad_request("'from' must not be after 'to'"));
            }
        }

        // Input validation: clamp pagination parameters
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);

        Ok(TransactionFilter {
            kind,
            category: self.category.filter(|c| !c.is_empty()),
            from: self.from,
            to: self.to,
            limit: Some(limit),
        })
    }
}

/// GET /api/users/:user_id/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    if state.store.get_profile(&user_id)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let filter = params.into_filter()?;
    let transactions = state.store.list_transactions(&user_id, &filter)?;
    Ok(Json(transactions))
}

/// POST /api/users/:user_id/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<NewTransaction>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state.store.add_transaction(&user_id, body)?;
    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete_transaction(id)?;
    Ok(Json(SuccessResponse { success: true }))
}
