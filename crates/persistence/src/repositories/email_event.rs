//! Repository for email event database operations.
//!
//! The email_events table is an append-only audit log; this repository
//! only inserts and reads.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EmailEventEntity;

/// Repository for email event operations.
#[derive(Clone)]
pub struct EmailEventRepository {
    pool: PgPool,
}

impl EmailEventRepository {
    /// Creates a new email event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends an event.
    ///
    /// `invitation_id` is null for failures recorded before an invitation
    /// row exists.
    pub async fn record(
        &self,
        invitation_id: Option<Uuid>,
        campaign_id: Uuid,
        sponsor_id: Option<Uuid>,
        tenant_id: Uuid,
        event_type: &str,
        event_data: Option<&serde_json::Value>,
    ) -> Result<EmailEventEntity, sqlx::Error> {
        sqlx::query_as::<_, EmailEventEntity>(
            r#"
            INSERT INTO email_events (invitation_id, campaign_id, sponsor_id, tenant_id,
                                      event_type, event_data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, invitation_id, campaign_id, sponsor_id, tenant_id,
                      event_type, event_data, created_at
            "#,
        )
        .bind(invitation_id)
        .bind(campaign_id)
        .bind(sponsor_id)
        .bind(tenant_id)
        .bind(event_type)
        .bind(event_data)
        .fetch_one(&self.pool)
        .await
    }

    /// Lists a campaign's events, newest first.
    pub async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmailEventEntity>, sqlx::Error> {
        sqlx::query_as::<_, EmailEventEntity>(
            r#"
            SELECT id, invitation_id, campaign_id, sponsor_id, tenant_id,
                   event_type, event_data, created_at
            FROM email_events
            WHERE campaign_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(campaign_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts a campaign's events of a given type.
    pub async fn count_by_campaign_and_type(
        &self,
        campaign_id: Uuid,
        event_type: &str,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM email_events
            WHERE campaign_id = $1 AND event_type = $2
            "#,
        )
        .bind(campaign_id)
        .bind(event_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }
}
