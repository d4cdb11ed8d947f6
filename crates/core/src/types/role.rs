//! Administrator roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Permission level of an administrator account.
///
/// Stored in Postgres as TEXT (`"admin"` / `"superadmin"`), which matches the
/// values exchanged over the JSON API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Can manage catalog data and run syncs.
    #[default]
    Admin,
    /// Can additionally manage administrator accounts.
    #[serde(rename = "superadmin")]
    SuperAdmin,
}

impl AdminRole {
    /// Canonical string form, matching storage and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unknown role strings.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown admin role: {0:?}")]
pub struct ParseRoleError(String);

impl std::str::FromStr for AdminRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

// SQLx TEXT mapping (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for AdminRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for AdminRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Self>()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for AdminRole {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_values() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(serde_json::to_string(&AdminRole::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("superadmin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert!("root".parse::<AdminRole>().is_err());
    }
}
