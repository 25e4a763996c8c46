//! Repository for tenant database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TenantEntity;

/// Repository for tenant operations.
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    /// Creates a new tenant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new tenant (provisioning flow).
    pub async fn create(
        &self,
        name: &str,
        contact_email: &str,
        contact_phone: Option<&str>,
        primary_color: Option<&str>,
        secondary_color: Option<&str>,
    ) -> Result<TenantEntity, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(
            r#"
            INSERT INTO tenants (name, contact_email, contact_phone, primary_color, secondary_color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, contact_email, contact_phone, primary_color, secondary_color,
                      signature_html, legal_markdown, privacy_markdown, terms_markdown,
                      status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(primary_color)
        .bind(secondary_color)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a tenant by its id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TenantEntity>, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(
            r#"
            SELECT id, name, contact_email, contact_phone, primary_color, secondary_color,
                   signature_html, legal_markdown, privacy_markdown, terms_markdown,
                   status, created_at, updated_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists tenants, newest first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<TenantEntity>, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(
            r#"
            SELECT id, name, contact_email, contact_phone, primary_color, secondary_color,
                   signature_html, legal_markdown, privacy_markdown, terms_markdown,
                   status, created_at, updated_at
            FROM tenants
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts all tenants.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenants")
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    /// Updates tenant settings; absent fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        contact_email: Option<&str>,
        contact_phone: Option<&str>,
        primary_color: Option<&str>,
        secondary_color: Option<&str>,
        signature_html: Option<&str>,
        legal_markdown: Option<&str>,
        privacy_markdown: Option<&str>,
        terms_markdown: Option<&str>,
        status: Option<&str>,
    ) -> Result<Option<TenantEntity>, sqlx::Error> {
        sqlx::query_as::<_, TenantEntity>(
            r#"
            UPDATE tenants
            SET name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                contact_phone = COALESCE($4, contact_phone),
                primary_color = COALESCE($5, primary_color),
                secondary_color = COALESCE($6, secondary_color),
                signature_html = COALESCE($7, signature_html),
                legal_markdown = COALESCE($8, legal_markdown),
                privacy_markdown = COALESCE($9, privacy_markdown),
                terms_markdown = COALESCE($10, terms_markdown),
                status = COALESCE($11, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, contact_email, contact_phone, primary_color, secondary_color,
                      signature_html, legal_markdown, privacy_markdown, terms_markdown,
                      status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(primary_color)
        .bind(secondary_color)
        .bind(signature_html)
        .bind(legal_markdown)
        .bind(privacy_markdown)
        .bind(terms_markdown)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }
}
