//! Health scoring handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use vitals_core::{assess_user, FinancialSnapshot, Goal, HealthReport};

/// Request body for ad-hoc scoring; missing fields score as zero / no goals
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScoreRequest {
    pub snapshot: FinancialSnapshot,
    pub goals: Vec<Goal>,
}

/// POST /api/score - Score a snapshot without storing anything
pub async fn score_snapshot(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScoreRequest>,
) -> Json<HealthReport> {
    Json(state.engine.compute(&body.snapshot, &body.goals))
}

/// GET /api/users/:user_id/health - Score the stored summary and goals
pub async fn get_user_health(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<HealthReport>, AppError> {
    let report = assess_user(&state.store, &state.engine, &user_id).await?;

    tracing::debug!(
        user = %user_id,
        score = report.overall_score,
        category = %report.category,
        "Assessed user"
    );

    Ok(Json(report))
}
