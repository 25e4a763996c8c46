//! Repository for campaign database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CampaignEntity;

/// Repository for campaign operations.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Creates a new campaign repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new campaign.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        tenant_id: Uuid,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        screen_type: Option<&str>,
        footfall_estimate: Option<i32>,
        price_hint: Option<f64>,
        deadline: Option<DateTime<Utc>>,
        is_public: bool,
        slug: Option<&str>,
    ) -> Result<CampaignEntity, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            INSERT INTO campaigns (tenant_id, title, description, location, screen_type,
                                   footfall_estimate, price_hint, deadline, is_public, slug)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, tenant_id, title, description, location, screen_type,
                      footfall_estimate, price_hint, deadline, is_public, slug,
                      created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(screen_type)
        .bind(footfall_estimate)
        .bind(price_hint)
        .bind(deadline)
        .bind(is_public)
        .bind(slug)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a campaign by its id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, tenant_id, title, description, location, screen_type,
                   footfall_estimate, price_hint, deadline, is_public, slug,
                   created_at, updated_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a campaign by id scoped to a tenant.
    pub async fn find_by_id_and_tenant(
        &self,
        id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, tenant_id, title, description, location, screen_type,
                   footfall_estimate, price_hint, deadline, is_public, slug,
                   created_at, updated_at
            FROM campaigns
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a publicly shared campaign by its slug.
    pub async fn find_public_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, tenant_id, title, description, location, screen_type,
                   footfall_estimate, price_hint, deadline, is_public, slug,
                   created_at, updated_at
            FROM campaigns
            WHERE slug = $1 AND is_public = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists a tenant's campaigns, newest first.
    pub async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, tenant_id, title, description, location, screen_type,
                   footfall_estimate, price_hint, deadline, is_public, slug,
                   created_at, updated_at
            FROM campaigns
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

    /// Counts a tenant's campaigns.
    pub async fn count_by_tenant(&self, tenant_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM campaigns WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    /// Updates a campaign; absent fields keep their current value.
    ///
    /// The deadline is deliberately not clearable through this path: a
    /// COALESCE update cannot distinguish "absent" from "null".
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        location: Option<&str>,
        screen_type: Option<&str>,
        footfall_estimate: Option<i32>,
        price_hint: Option<f64>,
        deadline: Option<DateTime<Utc>>,
        is_public: Option<bool>,
        slug: Option<&str>,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            UPDATE campaigns
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                screen_type = COALESCE($6, screen_type),
                footfall_estimate = COALESCE($7, footfall_estimate),
                price_hint = COALESCE($8, price_hint),
                deadline = COALESCE($9, deadline),
                is_public = COALESCE($10, is_public),
                slug = COALESCE($11, slug),
                updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, title, description, location, screen_type,
                      footfall_estimate, price_hint, deadline, is_public, slug,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(screen_type)
        .bind(footfall_estimate)
        .bind(price_hint)
        .bind(deadline)
        .bind(is_public)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deletes a campaign scoped to a tenant.
    ///
    /// Returns true if a campaign was deleted.
    pub async fn delete(&self, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM campaigns
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
