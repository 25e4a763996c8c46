//! Tenant entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{TenantResponse, TenantStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the tenants table.
#[derive(Debug, Clone, FromRow)]
pub struct TenantEntity {
    pub id: Uuid,
    pub name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub signature_html: Option<String>,
    pub legal_markdown: Option<String>,
    pub privacy_markdown: Option<String>,
    pub terms_markdown: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantEntity {
    /// Parsed lifecycle status; unknown values read as inactive.
    pub fn status(&self) -> TenantStatus {
        TenantStatus::parse(&self.status).unwrap_or(TenantStatus::Inactive)
    }

    pub fn is_active(&self) -> bool {
        self.status() == TenantStatus::Active
    }

    pub fn into_response(self) -> TenantResponse {
        let status = self.status();
        TenantResponse {
            id: self.id,
            name: self.name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            primary_color: self.primary_color,
            secondary_color: self.secondary_color,
            signature_html: self.signature_html,
            legal_markdown: self.legal_markdown,
            privacy_markdown: self.privacy_markdown,
            terms_markdown: self.terms_markdown,
            status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: &str) -> TenantEntity {
        TenantEntity {
            id: Uuid::new_v4(),
            name: "FC Exemple".to_string(),
            contact_email: "contact@fc-exemple.fr".to_string(),
            contact_phone: None,
            primary_color: Some("#004080".to_string()),
            secondary_color: None,
            signature_html: Some("<p>FC Exemple</p>".to_string()),
            legal_markdown: None,
            privacy_markdown: None,
            terms_markdown: None,
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_parsing() {
        assert!(entity("active").is_active());
        assert!(!entity("inactive").is_active());
        // unknown values are treated as inactive
        assert!(!entity("garbage").is_active());
    }

    #[test]
    fn test_into_response_carries_fields() {
        let e = entity("active");
        let id = e.id;
        let response = e.into_response();
        assert_eq!(response.id, id);
        assert_eq!(response.status, TenantStatus::Active);
        assert_eq!(response.signature_html.as_deref(), Some("<p>FC Exemple</p>"));
    }
}
