//! Session-related types for administrator authentication.

use serde::{Deserialize, Serialize};

use granito_core::{AdminId, AdminRole, Email};

use super::admin::Administrator;

/// Session-stored administrator identity.
///
/// Minimal data stored in the session cookie store to identify the
/// logged-in administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Administrator's database ID.
    pub id: AdminId,
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: Email,
    /// Role/permission level.
    pub role: AdminRole,
}

impl From<&Administrator> for CurrentAdmin {
    fn from(admin: &Administrator) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            email: admin.email.clone(),
            role: admin.role,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in administrator.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
