//! Repository for pledge database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PledgeEntity;

/// Repository for pledge operations.
#[derive(Clone)]
pub struct PledgeRepository {
    pool: PgPool,
}

impl PledgeRepository {
    /// Creates a new pledge repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a pledge.
    ///
    /// A unique partial index on `invitation_id` backs the at-most-one
    /// pledge per invitation invariant; a 23505 from here means the
    /// pre-insert existence check lost a race.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        campaign_id: Uuid,
        sponsor_id: Uuid,
        invitation_id: Option<Uuid>,
        status: &str,
        amount: f64,
        comment: Option<&str>,
        consent: bool,
        source: &str,
    ) -> Result<PledgeEntity, sqlx::Error> {
        sqlx::query_as::<_, PledgeEntity>(
            r#"
            INSERT INTO pledges (campaign_id, sponsor_id, invitation_id, status, amount,
                                 comment, consent, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, campaign_id, sponsor_id, invitation_id, status, amount,
                      comment, consent, source, created_at
            "#,
        )
        .bind(campaign_id)
        .bind(sponsor_id)
        .bind(invitation_id)
        .bind(status)
        .bind(amount)
        .bind(comment)
        .bind(consent)
        .bind(source)
        .fetch_one(&self.pool)
        .await
    }

    /// Checks whether a pledge exists for an invitation.
    pub async fn exists_for_invitation(&self, invitation_id: Uuid) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM pledges WHERE invitation_id = $1)
            "#,
        )
        .bind(invitation_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Checks whether a pledge exists for a (campaign, sponsor) pair.
    ///
    /// Consulted by the reminder sweep to suppress reminders once the
    /// sponsor has answered through any path.
    pub async fn exists_for_campaign_sponsor(
        &self,
        campaign_id: Uuid,
        sponsor_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM pledges WHERE campaign_id = $1 AND sponsor_id = $2)
            "#,
        )
        .bind(campaign_id)
        .bind(sponsor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Lists a campaign's pledges, newest first.
    pub async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PledgeEntity>, sqlx::Error> {
        sqlx::query_as::<_, PledgeEntity>(
            r#"
            SELECT id, campaign_id, sponsor_id, invitation_id, status, amount,
                   comment, consent, source, created_at
            FROM pledges
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

    /// Counts a campaign's pledges.
    pub async fn count_by_campaign(&self, campaign_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pledges WHERE campaign_id = $1")
            .bind(campaign_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }
}
