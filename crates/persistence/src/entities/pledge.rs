//! Pledge entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{PledgeResponse, PledgeSource, PledgeStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the pledges table.
#[derive(Debug, Clone, FromRow)]
pub struct PledgeEntity {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub sponsor_id: Uuid,
    pub invitation_id: Option<Uuid>,
    pub status: String,
    pub amount: f64,
    pub comment: Option<String>,
    pub consent: bool,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl PledgeEntity {
    /// Parsed answer; unknown values read as maybe.
    pub fn status(&self) -> PledgeStatus {
        PledgeStatus::parse(&self.status).unwrap_or(PledgeStatus::Maybe)
    }

    /// Parsed origin; unknown values read as public.
    pub fn source(&self) -> PledgeSource {
        PledgeSource::parse(&self.source).unwrap_or(PledgeSource::Public)
    }

    pub fn into_response(self) -> PledgeResponse {
        let status = self.status();
        let source = self.source();
        PledgeResponse {
            id: self.id,
            campaign_id: self.campaign_id,
            sponsor_id: self.sponsor_id,
            invitation_id: self.invitation_id,
            status,
            amount: self.amount,
            comment: self.comment,
            consent: self.consent,
            source,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> PledgeEntity {
        PledgeEntity {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            sponsor_id: Uuid::new_v4(),
            invitation_id: Some(Uuid::new_v4()),
            status: "yes".to_string(),
            amount: 800.0,
            comment: None,
            consent: true,
            source: "invite".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_and_source_parsing() {
        let pledge = entity();
        assert_eq!(pledge.status(), PledgeStatus::Yes);
        assert_eq!(pledge.source(), PledgeSource::Invite);
    }

    #[test]
    fn test_into_response() {
        let pledge = entity();
        let id = pledge.id;
        let response = pledge.into_response();
        assert_eq!(response.id, id);
        assert_eq!(response.amount, 800.0);
        assert_eq!(response.source, PledgeSource::Invite);
    }
}
