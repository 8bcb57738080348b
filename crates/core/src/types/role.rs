//! User roles and the privileged-role derivation.

use serde::{Deserialize, Serialize};

/// A role granted to a user account.
///
/// The server assigns `User` to every account; back-office roles are granted
/// by an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    Manager,
    Staff,
}

impl Role {
    /// Whether this role grants access to the admin console.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Staff)
    }
}

/// Whether any of the given roles grants admin-console access.
#[must_use]
pub fn has_privileged_role(roles: &[Role]) -> bool {
    roles.iter().any(|role| role.is_privileged())
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Admin => write!(f, "ADMIN"),
            Self::Manager => write!(f, "MANAGER"),
            Self::Staff => write!(f, "STAFF"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "STAFF" => Ok(Self::Staff),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_user_is_not_privileged() {
        assert!(!has_privileged_role(&[Role::User]));
        assert!(!has_privileged_role(&[]));
    }

    #[test]
    fn test_any_back_office_role_is_privileged() {
        assert!(has_privileged_role(&[Role::User, Role::Staff]));
        assert!(has_privileged_role(&[Role::Manager]));
        assert!(has_privileged_role(&[Role::Admin]));
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::Manager).expect("serialize");
        assert_eq!(json, "\"MANAGER\"");
        let back: Role = serde_json::from_str("\"STAFF\"").expect("deserialize");
        assert_eq!(back, Role::Staff);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("SUPERUSER".parse::<Role>().is_err());
    }
}
