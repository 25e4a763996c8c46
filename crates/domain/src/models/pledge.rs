//! Pledge domain models.
//!
//! A pledge is a sponsor's answer to a campaign: yes/maybe/no with an
//! amount. At most one pledge per invitation; public-page pledges carry no
//! invitation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Pledge answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PledgeStatus {
    Yes,
    Maybe,
    No,
}

impl PledgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PledgeStatus::Yes => "yes",
            PledgeStatus::Maybe => "maybe",
            PledgeStatus::No => "no",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yes" => Some(PledgeStatus::Yes),
            "maybe" => Some(PledgeStatus::Maybe),
            "no" => Some(PledgeStatus::No),
            _ => None,
        }
    }
}

/// Where the pledge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PledgeSource {
    Public,
    Invite,
}

impl PledgeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PledgeSource::Public => "public",
            PledgeSource::Invite => "invite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(PledgeSource::Public),
            "invite" => Some(PledgeSource::Invite),
            _ => None,
        }
    }
}

/// Sponsor-facing pledge submission (both public and token entry points).
///
/// Company and contact fields are used by the public path to self-register
/// the sponsor; the token path ignores them since the sponsor identity
/// comes from the invitation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitPledgeRequest {
    #[validate(length(max = 160, message = "Company must be at most 160 characters"))]
    pub company: Option<String>,

    #[validate(length(max = 120, message = "Contact name must be at most 120 characters"))]
    pub contact_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    pub status: PledgeStatus,

    /// Required strictly positive when status is `yes`; forced to 0 otherwise.
    #[validate(custom(function = "crate::models::pledge::validate_submitted_amount"))]
    pub amount: Option<f64>,

    #[validate(custom(function = "crate::models::pledge::validate_submitted_comment"))]
    pub comment: Option<String>,

    /// Explicit consent to be contacted; must be true.
    pub consent: bool,

    /// Honeypot field, hidden on the real form. Bots fill it in.
    #[serde(default)]
    pub website: Option<String>,
}

impl SubmitPledgeRequest {
    /// Cross-field validation on top of the derive-level rules.
    ///
    /// `yes` needs a strictly positive amount and every path needs consent.
    pub fn validate_submission(&self) -> Result<(), String> {
        if !self.consent {
            return Err("Consent is required".to_string());
        }
        if self.status == PledgeStatus::Yes {
            match self.amount {
                Some(a) if a.is_finite() && a > 0.0 => {}
                _ => return Err("A positive amount is required for a yes pledge".to_string()),
            }
        }
        Ok(())
    }

    /// Amount to persist: the submitted amount for `yes`, 0 otherwise.
    pub fn effective_amount(&self) -> f64 {
        match self.status {
            PledgeStatus::Yes => self.amount.unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Whether the hidden honeypot field was populated.
    pub fn is_honeypot_triggered(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.trim().is_empty())
    }
}

/// Pledge representation returned to club admins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PledgeResponse {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub sponsor_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_id: Option<Uuid>,
    pub status: PledgeStatus,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub consent: bool,
    pub source: PledgeSource,
    pub created_at: DateTime<Utc>,
}

/// Response to a pledge submission.
///
/// Honeypot submissions receive the same shape with `submitted: true` and
/// no id, so callers cannot distinguish being dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitPledgeResponse {
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pledge_id: Option<Uuid>,
}

pub(crate) fn validate_submitted_amount(amount: f64) -> Result<(), validator::ValidationError> {
    shared::validation::validate_amount(amount)
}

pub(crate) fn validate_submitted_comment(comment: &str) -> Result<(), validator::ValidationError> {
    shared::validation::validate_comment(comment)
}
