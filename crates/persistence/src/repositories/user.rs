//! Repository for user database operations.
//!
//! Users map identity-provider subjects to an application role and, for
//! club admins, an owning tenant.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;

/// Repository for user operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a user with an explicit id (the identity provider subject).
    pub async fn create(
        &self,
        id: Uuid,
        email: &str,
        role: &str,
        tenant_id: Option<Uuid>,
    ) -> Result<UserEntity, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, role, tenant_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, role, tenant_id, created_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(role)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a user by its id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, role, tenant_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
