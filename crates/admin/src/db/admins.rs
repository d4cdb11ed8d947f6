//! Administrator repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use granito_core::{AdminId, AdminRole, Email};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Administrator;

const DUPLICATE_MESSAGE: &str = "El usuario o email ya existe";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type; the only place the password hash is visible.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    username: String,
    email: String,
    password_hash: String,
    nombre_completo: String,
    rol: String,
    activo: bool,
    ultimo_acceso: Option<DateTime<Utc>>,
    creado_en: DateTime<Utc>,
}

impl AdminRow {
    fn into_parts(self) -> Result<(Administrator, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: AdminRole = self.rol.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        let admin = Administrator {
            id: AdminId::new(self.id),
            username: self.username,
            email,
            full_name: self.nombre_completo,
            role,
            active: self.activo,
            last_login: self.ultimo_acceso,
            created_at: self.creado_en,
        };
        Ok((admin, self.password_hash))
    }
}

impl TryFrom<AdminRow> for Administrator {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        row.into_parts().map(|(admin, _)| admin)
    }
}

const SELECT_COLUMNS: &str = "id, username, email, password_hash, nombre_completo, rol, \
                              activo, ultimo_acceso, creado_en";

/// Fields accepted by [`AdminRepository::update`]; `None` leaves a column
/// untouched.
#[derive(Debug, Default)]
pub struct AdminUpdate<'a> {
    pub email: Option<&'a Email>,
    pub full_name: Option<&'a str>,
    pub role: Option<AdminRole>,
    pub active: Option<bool>,
    /// Already-hashed replacement password.
    pub password_hash: Option<&'a str>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for administrator database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new administrator repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all administrators, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Administrator>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM administradores ORDER BY creado_en DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an administrator by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Administrator>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM administradores WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Look up an administrator by username or email for login, returning the
    /// stored bcrypt hash alongside the account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_login(
        &self,
        identifier: &str,
    ) -> Result<Option<(Administrator, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM administradores \
             WHERE username = $1 OR email = lower($1)"
        ))
        .bind(identifier)
        .fetch_optional(self.pool)
        .await?;

        row.map(AdminRow::into_parts).transpose()
    }

    /// Create a new administrator.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        email: &Email,
        password_hash: &str,
        full_name: &str,
        role: AdminRole,
    ) -> Result<Administrator, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "INSERT INTO administradores (username, email, password_hash, nombre_completo, rol) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(username)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(full_name)
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_MESSAGE))?;

        row.try_into()
    }

    /// Apply a partial update to an administrator.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the administrator doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    pub async fn update(
        &self,
        id: AdminId,
        changes: AdminUpdate<'_>,
    ) -> Result<Administrator, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "UPDATE administradores SET \
                 email           = COALESCE($2, email), \
                 nombre_completo = COALESCE($3, nombre_completo), \
                 rol             = COALESCE($4, rol), \
                 activo          = COALESCE($5, activo), \
                 password_hash   = COALESCE($6, password_hash), \
                 actualizado_en  = now() \
             WHERE id = $1 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(changes.email.map(Email::as_str))
        .bind(changes.full_name)
        .bind(changes.role.map(|r| r.as_str()))
        .bind(changes.active)
        .bind(changes.password_hash)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_MESSAGE))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn touch_last_login(&self, id: AdminId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE administradores SET ultimo_acceso = now() WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Delete an administrator by ID.
    ///
    /// Self-deletion is rejected at the route layer, before this runs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the administrator doesn't exist.
    pub async fn delete(&self, id: AdminId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM administradores WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
