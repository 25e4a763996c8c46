//! Tenant (club) domain models.
//!
//! Tenants own all campaigns, sponsors and templates. They are created by a
//! super-admin provisioning flow, mutated through self-service settings, and
//! never hard-deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Tenant lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Inactive,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(TenantStatus::Active),
            "inactive" => Some(TenantStatus::Inactive),
            _ => None,
        }
    }
}

/// Request to provision a new tenant (super-admin only).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTenantRequest {
    /// Club name.
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    /// Contact email for the club.
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: String,

    /// Contact phone (optional).
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub contact_phone: Option<String>,

    /// Primary branding color in #rrggbb notation.
    #[validate(custom(function = "crate::models::tenant::validate_optional_color"))]
    pub primary_color: Option<String>,

    /// Secondary branding color in #rrggbb notation.
    #[validate(custom(function = "crate::models::tenant::validate_optional_color"))]
    pub secondary_color: Option<String>,
}

/// Request to update tenant settings (self-service).
///
/// All fields are optional; only provided fields are updated.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub contact_phone: Option<String>,

    #[validate(custom(function = "crate::models::tenant::validate_optional_color"))]
    pub primary_color: Option<String>,

    #[validate(custom(function = "crate::models::tenant::validate_optional_color"))]
    pub secondary_color: Option<String>,

    /// Signature HTML appended to outgoing emails.
    pub signature_html: Option<String>,

    /// Legal notice (RGPD) markdown appended to outgoing emails.
    pub legal_markdown: Option<String>,

    /// Privacy policy markdown.
    pub privacy_markdown: Option<String>,

    /// Terms of use markdown.
    pub terms_markdown: Option<String>,

    /// Lifecycle status.
    pub status: Option<TenantStatus>,
}

/// Tenant representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TenantResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_markdown: Option<String>,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn validate_optional_color(color: &str) -> Result<(), validator::ValidationError> {
    shared::validation::validate_hex_color(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_status_roundtrip() {
        assert_eq!(TenantStatus::parse("active"), Some(TenantStatus::Active));
        assert_eq!(TenantStatus::parse("inactive"), Some(TenantStatus::Inactive));
        assert_eq!(TenantStatus::parse("deleted"), None);
        assert_eq!(TenantStatus::Active.as_str(), "active");
    }

    #[test]
    fn test_create_tenant_request_valid() {
        let request = CreateTenantRequest {
            name: "FC Exemple".to_string(),
            contact_email: "contact@fc-exemple.fr".to_string(),
            contact_phone: Some("+33 1 23 45 67 89".to_string()),
            primary_color: Some("#004080".to_string()),
            secondary_color: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_tenant_request_invalid_email() {
        let request = CreateTenantRequest {
            name: "FC Exemple".to_string(),
            contact_email: "not-an-email".to_string(),
            contact_phone: None,
            primary_color: None,
            secondary_color: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_tenant_request_invalid_color() {
        let request = CreateTenantRequest {
            name: "FC Exemple".to_string(),
            contact_email: "contact@fc-exemple.fr".to_string(),
            contact_phone: None,
            primary_color: Some("blue".to_string()),
            secondary_color: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_tenant_request_empty_is_valid() {
        let request = UpdateTenantRequest::default();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_tenant_response_skips_absent_fields() {
        let response = TenantResponse {
            id: Uuid::new_v4(),
            name: "FC Exemple".to_string(),
            contact_email: "contact@fc-exemple.fr".to_string(),
            contact_phone: None,
            primary_color: None,
            secondary_color: None,
            signature_html: None,
            legal_markdown: None,
            privacy_markdown: None,
            terms_markdown: None,
            status: TenantStatus::Active,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("contact_phone"));
        assert!(json.contains("\"status\":\"active\""));
    }
}
