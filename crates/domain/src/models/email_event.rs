//! Email event domain models.
//!
//! Email events are an append-only audit log: one row per delivery outcome
//! or engagement signal, never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of email event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailEventType {
    Sent,
    Bounced,
    Opened,
    Clicked,
}

impl EmailEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailEventType::Sent => "sent",
            EmailEventType::Bounced => "bounced",
            EmailEventType::Opened => "opened",
            EmailEventType::Clicked => "clicked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(EmailEventType::Sent),
            "bounced" => Some(EmailEventType::Bounced),
            "opened" => Some(EmailEventType::Opened),
            "clicked" => Some(EmailEventType::Clicked),
            _ => None,
        }
    }

    /// Invitation status this event advances to, when any.
    ///
    /// `sent` rows are recorded at issuance and do not move the status.
    pub fn invitation_status(&self) -> Option<crate::models::InvitationStatus> {
        use crate::models::InvitationStatus;
        match self {
            EmailEventType::Sent => None,
            EmailEventType::Bounced => Some(InvitationStatus::Bounced),
            EmailEventType::Opened => Some(InvitationStatus::Opened),
            EmailEventType::Clicked => Some(InvitationStatus::Clicked),
        }
    }
}

/// Provider callback reporting a delivery or engagement event.
///
/// The invitation id is carried in the provider's message metadata and
/// echoed back here. The request body is authenticated with an
/// HMAC-SHA256 signature over the raw payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderEventRequest {
    pub invitation_id: Uuid,
    pub event_type: EmailEventType,
    /// Provider-specific detail (bounce reason, link URL, user agent).
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// Email event representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EmailEventResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_id: Option<Uuid>,
    pub campaign_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_id: Option<Uuid>,
    pub tenant_id: Uuid,
    pub event_type: EmailEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
