//! Administrator account CRUD.
//!
//! Reads require any logged-in administrator; mutations require the
//! `superadmin` role.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use granito_core::{AdminId, AdminRole, Email};

use crate::db::{AdminRepository, RepositoryError, admins::AdminUpdate};
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireSuperAdmin};
use crate::models::Administrator;
use crate::state::AppState;

const ADMIN_NOT_FOUND: &str = "Administrador no encontrado";

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(format!("Email inválido: {e}")))
}

fn parse_role(raw: &str) -> Result<AdminRole, AppError> {
    AdminRole::from_str(raw)
        .map_err(|_| AppError::BadRequest("Rol inválido: usa 'admin' o 'superadmin'".to_string()))
}

fn hash_password(raw: &str) -> Result<String, AppError> {
    bcrypt::hash(raw, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("bcrypt hash failed: {e}")))
}

/// GET /api/administradores
///
/// # Errors
///
/// Propagates database failures.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Administrator>>, AppError> {
    let admins = AdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins))
}

/// GET /api/administradores/{id}
///
/// # Errors
///
/// Returns 404 for unknown IDs.
pub async fn get_one(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Administrator>, AppError> {
    let admin = AdminRepository::new(state.pool())
        .get_by_id(AdminId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(ADMIN_NOT_FOUND.to_string()))?;
    Ok(Json(admin))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminPayload {
    #[validate(length(min = 3, max = 50, message = "El usuario debe tener entre 3 y 50 caracteres"))]
    pub username: String,
    pub email: String,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: String,
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre_completo: String,
    /// `admin` or `superadmin`; defaults to `admin`.
    pub rol: Option<String>,
}

/// POST /api/administradores
///
/// # Errors
///
/// Returns 400 for invalid fields and 409 when the username or email is
/// already taken.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Json(payload): Json<CreateAdminPayload>,
) -> Result<(StatusCode, Json<Administrator>), AppError> {
    payload.validate()?;

    let email = parse_email(&payload.email)?;
    let role = payload
        .rol
        .as_deref()
        .map_or(Ok(AdminRole::Admin), parse_role)?;
    let password_hash = hash_password(&payload.password)?;

    let admin = AdminRepository::new(state.pool())
        .create(
            &payload.username,
            &email,
            &password_hash,
            &payload.nombre_completo,
            role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(admin)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdminPayload {
    pub email: Option<String>,
    pub nombre_completo: Option<String>,
    pub rol: Option<String>,
    pub activo: Option<bool>,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: Option<String>,
}

/// PATCH /api/administradores/{id}
///
/// Absent fields keep their current value.
///
/// # Errors
///
/// Returns 404 for unknown IDs, 400 for invalid fields and 409 when the
/// new email is taken.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAdminPayload>,
) -> Result<Json<Administrator>, AppError> {
    payload.validate()?;

    let email = payload.email.as_deref().map(parse_email).transpose()?;
    let role = payload.rol.as_deref().map(parse_role).transpose()?;
    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let changes = AdminUpdate {
        email: email.as_ref(),
        full_name: payload.nombre_completo.as_deref(),
        role,
        active: payload.activo,
        password_hash: password_hash.as_deref(),
    };

    let admin = AdminRepository::new(state.pool())
        .update(AdminId::new(id), changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(ADMIN_NOT_FOUND.to_string()),
            other => other.into(),
        })?;

    Ok(Json(admin))
}

/// DELETE /api/administradores/{id}
///
/// # Errors
///
/// Returns 400 when an administrator tries to delete their own account,
/// before any row is touched, and 404 for unknown IDs.
pub async fn remove(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    if admin.id == AdminId::new(id) {
        return Err(AppError::BadRequest(
            "No puedes eliminar tu propia cuenta".to_string(),
        ));
    }

    AdminRepository::new(state.pool())
        .delete(AdminId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(ADMIN_NOT_FOUND.to_string()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({ "success": true })))
}
