//! Session endpoints: login, logout, current identity.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};
use validator::Validate;

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{Administrator, CurrentAdmin, session_keys};
use crate::services::ActivityKind;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    /// Username or email.
    #[validate(length(min = 1, message = "El usuario es obligatorio"))]
    pub username: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

/// POST /api/auth/login
///
/// # Errors
///
/// Returns `Unauthorized` for unknown accounts, wrong passwords and
/// deactivated accounts, without distinguishing which.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Administrator>, AppError> {
    payload.validate()?;

    let repo = AdminRepository::new(state.pool());
    let Some((admin, password_hash)) = repo.get_for_login(&payload.username).await? else {
        warn!(username = %payload.username, "login attempt for unknown account");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let password_ok = bcrypt::verify(&payload.password, &password_hash)
        .map_err(|e| AppError::Internal(format!("bcrypt verify failed: {e}")))?;

    if !password_ok || !admin.active {
        warn!(username = %admin.username, "rejected login");
        state.activity().record(
            ActivityKind::Error,
            format!("Intento de acceso fallido para {}", admin.username),
            None,
        );
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    repo.touch_last_login(admin.id).await?;

    let current = CurrentAdmin::from(&admin);
    session
        .insert(session_keys::CURRENT_ADMIN, current)
        .await
        .map_err(|e| AppError::Internal(format!("session store failed: {e}")))?;

    info!(username = %admin.username, "administrator logged in");
    state.activity().record(
        ActivityKind::Login,
        format!("{} ha iniciado sesión", admin.username),
        Some(&admin.username),
    );

    Ok(Json(admin))
}

/// POST /api/auth/logout
///
/// # Errors
///
/// Returns `Unauthorized` when there is no session to close.
pub async fn logout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
) -> Result<Json<serde_json::Value>, AppError> {
    session
        .delete()
        .await
        .map_err(|e| AppError::Internal(format!("session delete failed: {e}")))?;

    state.activity().record(
        ActivityKind::Logout,
        format!("{} ha cerrado sesión", admin.username),
        Some(&admin.username),
    );

    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/auth/me
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<CurrentAdmin> {
    Json(admin)
}
