//! Email event entity (database row mapping).
//!
//! Append-only audit log; rows are never mutated.

use chrono::{DateTime, Utc};
use domain::models::{EmailEventResponse, EmailEventType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the email_events table.
#[derive(Debug, Clone, FromRow)]
pub struct EmailEventEntity {
    pub id: Uuid,
    pub invitation_id: Option<Uuid>,
    pub campaign_id: Uuid,
    pub sponsor_id: Option<Uuid>,
    pub tenant_id: Uuid,
    pub event_type: String,
    pub event_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl EmailEventEntity {
    /// Parsed event type, when recognized.
    pub fn event_type(&self) -> Option<EmailEventType> {
        EmailEventType::parse(&self.event_type)
    }

    pub fn into_response(self) -> EmailEventResponse {
        let event_type = self.event_type().unwrap_or(EmailEventType::Sent);
        EmailEventResponse {
            id: self.id,
            invitation_id: self.invitation_id,
            campaign_id: self.campaign_id,
            sponsor_id: self.sponsor_id,
            tenant_id: self.tenant_id,
            event_type,
            event_data: self.event_data,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_parsing() {
        let entity = EmailEventEntity {
            id: Uuid::new_v4(),
            invitation_id: None,
            campaign_id: Uuid::new_v4(),
            sponsor_id: Some(Uuid::new_v4()),
            tenant_id: Uuid::new_v4(),
            event_type: "bounced".to_string(),
            event_data: Some(serde_json::json!({"failure_reason": "invitation_creation_error"})),
            created_at: Utc::now(),
        };
        assert_eq!(entity.event_type(), Some(EmailEventType::Bounced));

        let response = entity.into_response();
        assert_eq!(response.event_type, EmailEventType::Bounced);
        assert!(response.invitation_id.is_none());
    }
}
