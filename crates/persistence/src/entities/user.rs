//! User entity (database row mapping).
//!
//! The id matches the external identity provider's subject; this table
//! only stores the role and tenant attachment.

use chrono::{DateTime, Utc};
use domain::models::Role;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub tenant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl UserEntity {
    /// Parsed role, when recognized.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        let user = UserEntity {
            id: Uuid::new_v4(),
            email: "admin@fc-exemple.fr".to_string(),
            role: "club_admin".to_string(),
            tenant_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
        };
        assert_eq!(user.role(), Some(Role::ClubAdmin));

        let unknown = UserEntity {
            role: "guest".to_string(),
            ..user
        };
        assert_eq!(unknown.role(), None);
    }
}
