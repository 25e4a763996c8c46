//! Invitation domain models.
//!
//! An invitation links a sponsor to a campaign through a unique,
//! time-limited token. The token is the sole authorization artifact for
//! the public response page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default invitation expiry in days.
pub const DEFAULT_EXPIRY_DAYS: i32 = 30;

/// Minimum configurable expiry days.
pub const MIN_EXPIRY_DAYS: i32 = 1;

/// Maximum configurable expiry days.
pub const MAX_EXPIRY_DAYS: i32 = 180;

/// Invitation delivery/response status.
///
/// Transitions: `sent → opened | clicked | bounced | responded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Sent,
    Opened,
    Clicked,
    Bounced,
    Responded,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Sent => "sent",
            InvitationStatus::Opened => "opened",
            InvitationStatus::Clicked => "clicked",
            InvitationStatus::Bounced => "bounced",
            InvitationStatus::Responded => "responded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(InvitationStatus::Sent),
            "opened" => Some(InvitationStatus::Opened),
            "clicked" => Some(InvitationStatus::Clicked),
            "bounced" => Some(InvitationStatus::Bounced),
            "responded" => Some(InvitationStatus::Responded),
            _ => None,
        }
    }

    /// Whether an engagement event may advance this status.
    ///
    /// `responded` is terminal; engagement events never downgrade it.
    pub fn can_advance_to(&self, next: InvitationStatus) -> bool {
        !matches!(self, InvitationStatus::Responded) && *self != next
    }
}

/// Invitation representation returned by the API.
///
/// The token is exposed only to authenticated club admins; the public
/// token page resolves the token server-side and never echoes it back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub sponsor_id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing invitations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsQuery {
    /// Filter by status ("sent", "opened", "clicked", "bounced",
    /// "responded"); absent means all.
    pub status: Option<String>,

    /// Page number (default: 1).
    pub page: Option<i64>,

    /// Items per page (default: 50, max: 100).
    pub per_page: Option<i64>,
}

impl ListInvitationsQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(50).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    /// Parsed status filter; `None` when absent or unknown.
    pub fn status_filter(&self) -> Option<InvitationStatus> {
        self.status.as_deref().and_then(InvitationStatus::parse)
    }
}

/// Clamps a requested expiry to the allowed range, defaulting when absent.
pub fn clamp_expiry_days(requested: Option<i32>) -> i32 {
    requested
        .unwrap_or(DEFAULT_EXPIRY_DAYS)
        .clamp(MIN_EXPIRY_DAYS, MAX_EXPIRY_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            InvitationStatus::Sent,
            InvitationStatus::Opened,
            InvitationStatus::Clicked,
            InvitationStatus::Bounced,
            InvitationStatus::Responded,
        ] {
            assert_eq!(InvitationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InvitationStatus::parse("unknown"), None);
    }

    #[test]
    fn test_responded_is_terminal() {
        assert!(!InvitationStatus::Responded.can_advance_to(InvitationStatus::Opened));
        assert!(!InvitationStatus::Responded.can_advance_to(InvitationStatus::Bounced));
        assert!(InvitationStatus::Sent.can_advance_to(InvitationStatus::Opened));
        assert!(InvitationStatus::Opened.can_advance_to(InvitationStatus::Clicked));
    }

    #[test]
    fn test_self_transition_rejected() {
        assert!(!InvitationStatus::Opened.can_advance_to(InvitationStatus::Opened));
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListInvitationsQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 50);
        assert_eq!(query.offset(), 0);
        assert!(query.status_filter().is_none());
    }

    #[test]
    fn test_list_query_status_filter() {
        let query = ListInvitationsQuery {
            status: Some("responded".to_string()),
            page: None,
            per_page: None,
        };
        assert_eq!(query.status_filter(), Some(InvitationStatus::Responded));

        let query = ListInvitationsQuery {
            status: Some("bogus".to_string()),
            page: None,
            per_page: None,
        };
        assert!(query.status_filter().is_none());
    }

    #[test]
    fn test_clamp_expiry_days() {
        assert_eq!(clamp_expiry_days(None), DEFAULT_EXPIRY_DAYS);
        assert_eq!(clamp_expiry_days(Some(0)), MIN_EXPIRY_DAYS);
        assert_eq!(clamp_expiry_days(Some(365)), MAX_EXPIRY_DAYS);
        assert_eq!(clamp_expiry_days(Some(14)), 14);
    }
}
