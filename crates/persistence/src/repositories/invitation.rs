//! Repository for invitation database operations.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::entities::InvitationEntity;

/// Repository for invitation operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

/// Joined row used by the reminder sweep: invitation plus the campaign and
/// sponsor context needed to render the email.
#[derive(Debug, Clone, FromRow)]
pub struct SweepRow {
    pub invitation_id: Uuid,
    pub campaign_id: Uuid,
    pub sponsor_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub token: String,
    pub invitation_created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub campaign_title: String,
    pub company: String,
    pub contact_name: Option<String>,
}

impl InvitationRepository {
    /// Creates a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an invitation with status `sent`.
    pub async fn create(
        &self,
        campaign_id: Uuid,
        sponsor_id: Uuid,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<InvitationEntity, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO invitations (campaign_id, sponsor_id, email, token, status, expires_at)
            VALUES ($1, $2, $3, $4, 'sent', $5)
            RETURNING id, campaign_id, sponsor_id, email, token, status, expires_at,
                      created_at, responded_at
            "#,
        )
        .bind(campaign_id)
        .bind(sponsor_id)
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds an invitation by its token.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, campaign_id, sponsor_id, email, token, status, expires_at,
                   created_at, responded_at
            FROM invitations
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds an invitation by its id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, campaign_id, sponsor_id, email, token, status, expires_at,
                   created_at, responded_at
            FROM invitations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists a campaign's invitations, newest first, optionally filtered
    /// by status.
    pub async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, campaign_id, sponsor_id, email, token, status, expires_at,
                   created_at, responded_at
            FROM invitations
            WHERE campaign_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(campaign_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts a campaign's invitations, optionally filtered by status.
    pub async fn count_by_campaign(
        &self,
        campaign_id: Uuid,
        status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM invitations
            WHERE campaign_id = $1 AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(campaign_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    /// Marks an invitation as responded atomically.
    ///
    /// Returns `true` if the transition happened, `false` if another
    /// submission won the race.
    pub async fn mark_responded(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'responded', responded_at = NOW()
            WHERE id = $1 AND status <> 'responded'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Advances the delivery status from a provider event.
    ///
    /// `responded` is terminal and never overwritten.
    pub async fn advance_status(&self, id: Uuid, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = $2
            WHERE id = $1 AND status <> 'responded'
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads unresolved invitations of campaigns without a deadline,
    /// joined with the context the reminder sweep renders from.
    ///
    /// Bounced and responded invitations are excluded at the query level;
    /// the pledge check stays per-row in the sweep.
    pub async fn sweep_rows_without_deadline(&self) -> Result<Vec<SweepRow>, sqlx::Error> {
        sqlx::query_as::<_, SweepRow>(
            r#"
            SELECT i.id AS invitation_id, i.campaign_id, i.sponsor_id, c.tenant_id,
                   i.email, i.token, i.created_at AS invitation_created_at, c.deadline,
                   c.title AS campaign_title, s.company, s.contact_name
            FROM invitations i
            JOIN campaigns c ON c.id = i.campaign_id
            JOIN sponsors s ON s.id = i.sponsor_id
            WHERE c.deadline IS NULL
              AND i.status NOT IN ('responded', 'bounced')
              AND i.expires_at > NOW()
            ORDER BY i.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Loads unresolved invitations of campaigns with a deadline.
    pub async fn sweep_rows_with_deadline(&self) -> Result<Vec<SweepRow>, sqlx::Error> {
        sqlx::query_as::<_, SweepRow>(
            r#"
            SELECT i.id AS invitation_id, i.campaign_id, i.sponsor_id, c.tenant_id,
                   i.email, i.token, i.created_at AS invitation_created_at, c.deadline,
                   c.title AS campaign_title, s.company, s.contact_name
            FROM invitations i
            JOIN campaigns c ON c.id = i.campaign_id
            JOIN sponsors s ON s.id = i.sponsor_id
            WHERE c.deadline IS NOT NULL
              AND i.status NOT IN ('responded', 'bounced')
              AND i.expires_at > NOW()
            ORDER BY i.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// Generates a secure invitation token.
///
/// 32 URL-safe characters, avoiding confusing ones (0, O, 1, l, I).
pub fn generate_invitation_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
    let mut rng = rand::thread_rng();

    (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Computes an invitation expiry from now.
pub fn calculate_invitation_expiry(days: i32) -> DateTime<Utc> {
    Utc::now() + Duration::days(days as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_invitation_token_length() {
        let token = generate_invitation_token();
        assert_eq!(token.len(), 32);
    }

    #[test]
    fn test_generate_invitation_token_unique() {
        let token1 = generate_invitation_token();
        let token2 = generate_invitation_token();
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_generate_invitation_token_charset() {
        let token = generate_invitation_token();
        // Should not contain confusing characters
        assert!(!token.contains('0'));
        assert!(!token.contains('O'));
        assert!(!token.contains('1'));
        assert!(!token.contains('l'));
        assert!(!token.contains('I'));
    }

    #[test]
    fn test_calculate_invitation_expiry() {
        let expiry = calculate_invitation_expiry(30);
        let diff = expiry - Utc::now();
        assert!(diff.num_days() >= 29 && diff.num_days() <= 30);
    }
}
