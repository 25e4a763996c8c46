//! Invitation entity (database row mapping).
//!
//! The token is capability-bearing: anyone holding it may submit one
//! pledge on the public response page until it expires.

use chrono::{DateTime, Utc};
use domain::models::{InvitationResponse, InvitationStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub sponsor_id: Uuid,
    pub email: String,
    pub token: String,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl InvitationEntity {
    /// Parsed status; unknown values read as sent.
    pub fn status(&self) -> InvitationStatus {
        InvitationStatus::parse(&self.status).unwrap_or(InvitationStatus::Sent)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    pub fn has_responded(&self) -> bool {
        self.status() == InvitationStatus::Responded
    }

    /// Whether the token may still be used to submit a pledge.
    pub fn is_usable(&self) -> bool {
        !self.is_expired() && !self.has_responded()
    }

    /// Days elapsed since the invitation was created, floored.
    pub fn days_since_created(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }

    pub fn into_response(self) -> InvitationResponse {
        let status = self.status();
        InvitationResponse {
            id: self.id,
            campaign_id: self.campaign_id,
            sponsor_id: self.sponsor_id,
            email: self.email,
            status,
            expires_at: self.expires_at,
            created_at: self.created_at,
            responded_at: self.responded_at,
        }
    }
}
