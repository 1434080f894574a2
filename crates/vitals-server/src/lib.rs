//! Vitals Web Server
//!
//! Axum-based REST API for the Vitals financial health tool.
//!
//! Security features:
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Input validation (pagination limits, positive amounts)
//! - Sanitized error responses

use std::future::Future;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use vitals_core::{HealthEngine, MemoryStore};

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Default number of transactions returned when no limit is given
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub store: MemoryStore,
    pub engine: HealthEngine,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(store: MemoryStore, engine: HealthEngine, config: ServerConfig) -> Router {
    let cors = cors_layer(&config);

    let state = Arc::new(AppState { store, engine });

    let api_routes = Router::new()
        // Scoring
        .route("/score", post(handlers::score_snapshot))
        // Users
        .route("/users", post(handlers::create_user))
        .route(
            "/users/:user_id",
            get(handlers::get_user).patch(handlers::update_user),
        )
        .route("/users/:user_id/snapshot", get(handlers::get_snapshot))
        .route("/users/:user_id/health", get(handlers::get_user_health))
        // Transactions
        .route(
            "/users/:user_id/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/:id", delete(handlers::delete_transaction))
        // Goals
        .route(
            "/users/:user_id/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route("/goals/:id/progress", post(handlers::update_goal_progress))
        .route(
            "/goals/:id",
            get(handlers::get_goal).delete(handlers::delete_goal),
        )
        // Budgets
        .route(
            "/users/:user_id/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route(
            "/budgets/:id",
            patch(handlers::update_budget).delete(handlers::delete_budget),
        )
        // Subscriptions
        .route(
            "/users/:user_id/subscriptions",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        )
        .route("/subscriptions/:id", delete(handlers::delete_subscription))
        // Recurring transactions
        .route(
            "/users/:user_id/recurring",
            get(handlers::list_recurring).post(handlers::create_recurring),
        )
        .route("/recurring/:id/post", post(handlers::post_recurring))
        .route("/recurring/:id", delete(handlers::delete_recurring));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        cors
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Start the server and run until Ctrl-C.
///
/// In-flight requests finish before this returns, so callers can persist the
/// store afterwards.
pub async fn serve_with_config(
    addr: &str,
    store: MemoryStore,
    engine: HealthEngine,
    config: ServerConfig,
) -> anyhow::Result<()> {
    serve_until(addr, store, engine, config, shutdown_signal()).await
}

/// Start the server and run until `shutdown` resolves
pub async fn serve_until<F>(
    addr: &str,
    store: MemoryStore,
    engine: HealthEngine,
    config: ServerConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(store, engine, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        // Keep serving when no handler could be installed
        std::future::pending::<()>().await;
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Client-caused store errors keep their message
        match err.downcast_ref::<vitals_core::Error>() {
            Some(vitals_core::Error::NotFound(what)) => {
                return Self::not_found(&format!("Not found: {}", what));
            }
            Some(vitals_core::Error::InvalidData(msg)) => return Self::bad_request(msg),
            _ => {}
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
