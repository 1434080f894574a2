//! Subscription handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse};
use vitals_core::{Frequency, NewSubscription, Subscription, SubscriptionTotals};

/// Query parameters for listing subscriptions
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    /// Billing cycle to show, or "all"
    pub cycle: Option<String>,
}

/// Subscriptions plus normalized totals across all of them
#[derive(Serialize)]
pub struct SubscriptionsResponse {
    pub subscriptions: Vec<Subscription>,
    pub totals: SubscriptionTotals,
}

/// GET /api/users/:user_id/subscriptions - List by next billing date
///
/// Totals always cover every subscription, regardless of the cycle filter.
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<SubscriptionQuery>,
) -> Result<Json<SubscriptionsResponse>, AppError> {
    if state.store.get_profile(&user_id)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let cycle = match params.cycle.as_deref() {
        None | Some("") | Some("all") => None,
        Some(c) => Some(c.parse::<Frequency>().map_err(|e| AppError::bad_request(&e))?),
    };

    let subscriptions = state.store.list_subscriptions(&user_id, cycle)?;
    let totals = state.store.subscription_totals(&user_id)?;
    Ok(Json(SubscriptionsResponse {
        subscriptions,
        totals,
    }))
}

/// POST /api/users/:user_id/subscriptions - Add a subscription
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<NewSubscription>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state.store.add_subscription(&user_id, body)?;
    Ok(Json(subscription))
}

/// DELETE /api/subscriptions/:id - Delete a subscription
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete_subscription(id)?;
    Ok(Json(SuccessResponse { success: true }))
}
