//! Repository for scheduled job database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ScheduledJobEntity;

/// Repository for scheduled job operations.
#[derive(Clone)]
pub struct ScheduledJobRepository {
    pool: PgPool,
}

impl ScheduledJobRepository {
    /// Creates a new scheduled job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a pending job.
    pub async fn create(
        &self,
        tenant_id: Uuid,
        campaign_id: Uuid,
        job_type: &str,
        payload: &serde_json::Value,
        scheduled_at: DateTime<Utc>,
    ) -> Result<ScheduledJobEntity, sqlx::Error> {
        sqlx::query_as::<_, ScheduledJobEntity>(
            r#"
            INSERT INTO scheduled_jobs (tenant_id, campaign_id, job_type, payload, status, scheduled_at)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING id, tenant_id, campaign_id, job_type, payload, status,
                      scheduled_at, executed_at, error_message, created_at
            "#,
        )
        .bind(tenant_id)
        .bind(campaign_id)
        .bind(job_type)
        .bind(payload)
        .bind(scheduled_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a job by id scoped to a tenant.
    pub async fn find_by_id_and_tenant(
        &self,
        id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<ScheduledJobEntity>, sqlx::Error> {
        sqlx::query_as::<_, ScheduledJobEntity>(
            r#"
            SELECT id, tenant_id, campaign_id, job_type, payload, status,
                   scheduled_at, executed_at, error_message, created_at
            FROM scheduled_jobs
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists a tenant's jobs, newest first, optionally filtered by status.
    pub async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScheduledJobEntity>, sqlx::Error> {
        sqlx::query_as::<_, ScheduledJobEntity>(
            r#"
            SELECT id, tenant_id, campaign_id, job_type, payload, status,
                   scheduled_at, executed_at, error_message, created_at
            FROM scheduled_jobs
            WHERE tenant_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(tenant_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts a tenant's jobs, optionally filtered by status.
    pub async fn count_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM scheduled_jobs
            WHERE tenant_id = $1 AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(tenant_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    /// Loads due pending jobs, oldest first.
    pub async fn find_due(&self, batch_size: i64) -> Result<Vec<ScheduledJobEntity>, sqlx::Error> {
        sqlx::query_as::<_, ScheduledJobEntity>(
            r#"
            SELECT id, tenant_id, campaign_id, job_type, payload, status,
                   scheduled_at, executed_at, error_message, created_at
            FROM scheduled_jobs
            WHERE status = 'pending' AND scheduled_at <= NOW()
            ORDER BY scheduled_at ASC
            LIMIT $1
            "#,
        )
        .bind(batch_size)
        .fetch_all(&self.pool)
        .await
    }

    /// Claims a pending job atomically.
    ///
    /// Returns `true` if this invocation won the claim, `false` if a
    /// concurrent runner already moved the job out of `pending`.
    pub async fn claim(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE scheduled_jobs
            SET status = 'processing'
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Records a job's terminal outcome.
    pub async fn finish(
        &self,
        id: Uuid,
        status: &str,
        error_message: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE scheduled_jobs
            SET status = $2, executed_at = NOW(), error_message = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(error_message)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
