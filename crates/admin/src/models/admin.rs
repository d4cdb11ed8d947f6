//! Administrator account domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use granito_core::{AdminId, AdminRole, Email};

/// An administrator account.
///
/// The bcrypt hash never leaves the db layer; this type is safe to serialize
/// straight into API responses.
#[derive(Debug, Clone, Serialize)]
pub struct Administrator {
    /// Unique administrator ID.
    pub id: AdminId,
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: Email,
    /// Display name.
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    /// Role/permission level.
    #[serde(rename = "rol")]
    pub role: AdminRole,
    /// Whether the account can log in.
    #[serde(rename = "activo")]
    pub active: bool,
    /// Last successful login, if any.
    #[serde(rename = "ultimo_acceso")]
    pub last_login: Option<DateTime<Utc>>,
    /// When the account was created.
    #[serde(rename = "creado_en")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_spanish_field_names_without_hash() {
        let admin = Administrator {
            id: AdminId::new(1),
            username: "marta".into(),
            email: Email::parse("marta@granitoskate.com").unwrap(),
            full_name: "Marta Ruiz".into(),
            role: AdminRole::SuperAdmin,
            active: true,
            last_login: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["rol"], "superadmin");
        assert_eq!(json["nombre_completo"], "Marta Ruiz");
        assert!(json.get("password_hash").is_none());
    }
}
