//! Activity log endpoint.

use axum::{Json, extract::{Query, State}};
use serde::Deserialize;

use crate::middleware::RequireAdmin;
use crate::services::{ActivityEntry, ActivityKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Optional kind filter, e.g. `?tipo=login`.
    pub tipo: Option<ActivityKind>,
}

/// GET /api/activity
///
/// Recent events, newest first.
pub async fn recent(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ActivityQuery>,
) -> Json<Vec<ActivityEntry>> {
    Json(state.activity().recent(query.tipo))
}
