//! Repository for sponsor database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SponsorEntity;

/// Repository for sponsor operations.
#[derive(Clone)]
pub struct SponsorRepository {
    pool: PgPool,
}

impl SponsorRepository {
    /// Creates a new sponsor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new sponsor.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        tenant_id: Uuid,
        company: &str,
        contact_name: Option<&str>,
        email: &str,
        phone: Option<&str>,
        segment: Option<&str>,
        notes: Option<&str>,
    ) -> Result<SponsorEntity, sqlx::Error> {
        sqlx::query_as::<_, SponsorEntity>(
            r#"
            INSERT INTO sponsors (tenant_id, company, contact_name, email, phone, segment, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, tenant_id, company, contact_name, email, phone, segment, notes,
                      created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(company)
        .bind(contact_name)
        .bind(email)
        .bind(phone)
        .bind(segment)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a sponsor by id scoped to a tenant.
    pub async fn find_by_id_and_tenant(
        &self,
        id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<SponsorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SponsorEntity>(
            r#"
            SELECT id, tenant_id, company, contact_name, email, phone, segment, notes,
                   created_at, updated_at
            FROM sponsors
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a sponsor by email within a tenant (case-insensitive).
    pub async fn find_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> Result<Option<SponsorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SponsorEntity>(
            r#"
            SELECT id, tenant_id, company, contact_name, email, phone, segment, notes,
                   created_at, updated_at
            FROM sponsors
            WHERE tenant_id = $1 AND LOWER(email) = LOWER($2)
            "#,
        )
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a sponsor by (tenant, email), creating it when unseen.
    ///
    /// Idempotent entry point for public-form self-registration. A race
    /// between the lookup and the insert is accepted: the second insert
    /// simply creates a duplicate contact the club can merge by hand.
    pub async fn find_or_create(
        &self,
        tenant_id: Uuid,
        company: &str,
        contact_name: Option<&str>,
        email: &str,
        phone: Option<&str>,
    ) -> Result<SponsorEntity, sqlx::Error> {
        if let Some(existing) = self.find_by_email(tenant_id, email).await? {
            return Ok(existing);
        }
        self.create(tenant_id, company, contact_name, email, phone, None, None)
            .await
    }

    /// Lists a tenant's sponsors, newest first.
    pub async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SponsorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SponsorEntity>(
            r#"
            SELECT id, tenant_id, company, contact_name, email, phone, segment, notes,
                   created_at, updated_at
            FROM sponsors
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts a tenant's sponsors.
    pub async fn count_by_tenant(&self, tenant_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sponsors WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    /// Loads sponsors by id within a tenant, preserving no particular order.
    pub async fn find_by_ids(
        &self,
        tenant_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<SponsorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SponsorEntity>(
            r#"
            SELECT id, tenant_id, company, contact_name, email, phone, segment, notes,
                   created_at, updated_at
            FROM sponsors
            WHERE tenant_id = $1 AND id = ANY($2)
            "#,
        )
        .bind(tenant_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await
    }

    /// Updates a sponsor; absent fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        company: Option<&str>,
        contact_name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        segment: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<SponsorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SponsorEntity>(
            r#"
            UPDATE sponsors
            SET company = COALESCE($3, company),
                contact_name = COALESCE($4, contact_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                segment = COALESCE($7, segment),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, company, contact_name, email, phone, segment, notes,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(company)
        .bind(contact_name)
        .bind(email)
        .bind(phone)
        .bind(segment)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes a sponsor scoped to a tenant.
    ///
    /// Returns true if a sponsor was deleted.
    pub async fn delete(&self, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM sponsors
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
