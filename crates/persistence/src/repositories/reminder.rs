//! Repository for reminder database operations.
//!
//! Reminder rows are the bookkeeping side of the reminder mechanism: the
//! sweep decides *when* from timestamps and records *that it fired* here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ReminderEntity;

/// Repository for reminder operations.
#[derive(Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    /// Creates a new reminder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a pending reminder scheduled at issuance.
    pub async fn create_scheduled(
        &self,
        invitation_id: Uuid,
        scheduled_for: DateTime<Utc>,
    ) -> Result<ReminderEntity, sqlx::Error> {
        sqlx::query_as::<_, ReminderEntity>(
            r#"
            INSERT INTO reminders (invitation_id, kind, scheduled_for, status)
            VALUES ($1, 'scheduled', $2, 'pending')
            RETURNING id, invitation_id, kind, scheduled_for, status, created_at
            "#,
        )
        .bind(invitation_id)
        .bind(scheduled_for)
        .fetch_one(&self.pool)
        .await
    }

    /// Records that a sweep reminder fired for (invitation, kind).
    ///
    /// Upsert against the unique (invitation_id, kind) index for sweep
    /// kinds: a repeated sweep within the same day hits the conflict arm
    /// and the caller can tell nothing new was recorded.
    pub async fn record_fired(
        &self,
        invitation_id: Uuid,
        kind: &str,
        scheduled_for: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO reminders (invitation_id, kind, scheduled_for, status)
            VALUES ($1, $2, $3, 'sent')
            ON CONFLICT (invitation_id, kind) WHERE kind <> 'scheduled'
            DO UPDATE SET status = 'sent'
            "#,
        )
        .bind(invitation_id)
        .bind(kind)
        .bind(scheduled_for)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Checks whether a sweep reminder of this kind already fired.
    pub async fn has_fired(&self, invitation_id: Uuid, kind: &str) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reminders
                WHERE invitation_id = $1 AND kind = $2 AND status = 'sent'
            )
            "#,
        )
        .bind(invitation_id)
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Marks an invitation's pending reminders as skipped.
    ///
    /// Called when a pledge resolves the invitation before its reminders
    /// fire. Returns the number of rows skipped.
    pub async fn skip_pending_for_invitation(
        &self,
        invitation_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE reminders
            SET status = 'skipped'
            WHERE invitation_id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Lists an invitation's reminders, oldest first.
    pub async fn list_by_invitation(
        &self,
        invitation_id: Uuid,
    ) -> Result<Vec<ReminderEntity>, sqlx::Error> {
        sqlx::query_as::<_, ReminderEntity>(
            r#"
            SELECT id, invitation_id, kind, scheduled_for, status, created_at
            FROM reminders
            WHERE invitation_id = $1
            ORDER BY scheduled_for ASC
            "#,
        )
        .bind(invitation_id)
        .fetch_all(&self.pool)
        .await
    }
}
