//! Email template domain models.
//!
//! Templates are stored per tenant (or globally when `tenant_id` is null)
//! and looked up by type; at most one active template per type is expected,
//! which create/update enforce by deactivating siblings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Template type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// Initial invitation email.
    Invitation,
    /// Follow-up 5 days after sending (no-deadline campaigns).
    Reminder5d,
    /// 10 days before the campaign deadline.
    Reminder10d,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Invitation => "invitation",
            TemplateType::Reminder5d => "reminder_5d",
            TemplateType::Reminder10d => "reminder_10d",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "invitation" => Some(TemplateType::Invitation),
            "reminder_5d" => Some(TemplateType::Reminder5d),
            "reminder_10d" => Some(TemplateType::Reminder10d),
            _ => None,
        }
    }
}

/// Request to create an email template.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTemplateRequest {
    pub template_type: TemplateType,

    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, message = "HTML body must not be empty"))]
    pub html_body: String,

    #[validate(length(min = 1, message = "Text body must not be empty"))]
    pub text_body: String,

    /// Whether this template becomes the active one for its type.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request to update an email template. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "HTML body must not be empty"))]
    pub html_body: Option<String>,

    #[validate(length(min = 1, message = "Text body must not be empty"))]
    pub text_body: Option<String>,

    pub is_active: Option<bool>,
}

/// Template representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplateResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub template_type: TemplateType,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}
