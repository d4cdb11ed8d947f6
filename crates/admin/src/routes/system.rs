//! Health probes and environment diagnostics.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::middleware::RequireSuperAdmin;
use crate::state::AppState;

/// GET /health
///
/// Liveness probe; always succeeds while the process runs.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /health/ready
///
/// Readiness probe; checks the database connection.
pub async fn ready(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(json!({ "status": "ready" })))
}

/// GET /api/system/env
///
/// Reports which configuration variables are set. Presence booleans only;
/// values never leave the process.
///
/// # Errors
///
/// Requires the `superadmin` role.
pub async fn env_presence(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "variables": AppConfig::presence_report() })))
}
