//! User and role domain models.
//!
//! Identity lives with the external provider; this backend only maps a
//! verified user id to a role and, for club admins, an owning tenant.

use serde::{Deserialize, Serialize};

/// Application role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator; may provision tenants and see everything.
    SuperAdmin,
    /// Club administrator; scoped to one tenant.
    ClubAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::ClubAdmin => "club_admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(Role::SuperAdmin),
            "club_admin" => Some(Role::ClubAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("club_admin"), Some(Role::ClubAdmin));
        assert_eq!(Role::parse("member"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::SuperAdmin.to_string(), "super_admin");
        assert_eq!(Role::ClubAdmin.to_string(), "club_admin");
    }
}
