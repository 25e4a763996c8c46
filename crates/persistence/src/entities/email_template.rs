//! Email template entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{TemplateResponse, TemplateType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the email_templates table.
///
/// `tenant_id` NULL marks a global default, used when a tenant has no
/// active template of the requested type.
#[derive(Debug, Clone, FromRow)]
pub struct EmailTemplateEntity {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub template_type: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailTemplateEntity {
    /// Parsed template type, when recognized.
    pub fn template_type(&self) -> Option<TemplateType> {
        TemplateType::parse(&self.template_type)
    }

    pub fn is_global(&self) -> bool {
        self.tenant_id.is_none()
    }

    pub fn into_response(self) -> TemplateResponse {
        let template_type = self.template_type().unwrap_or(TemplateType::Invitation);
        TemplateResponse {
            id: self.id,
            tenant_id: self.tenant_id,
            template_type,
            subject: self.subject,
            html_body: self.html_body,
            text_body: self.text_body,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(tenant_id: Option<Uuid>) -> EmailTemplateEntity {
        EmailTemplateEntity {
            id: Uuid::new_v4(),
            tenant_id,
            template_type: "reminder_5d".to_string(),
            subject: "Relance {{campaign_title}}".to_string(),
            html_body: "<p>Bonjour {{contact_name}}</p>".to_string(),
            text_body: "Bonjour {{contact_name}}".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_template_type_parsing() {
        assert_eq!(entity(None).template_type(), Some(TemplateType::Reminder5d));
    }

    #[test]
    fn test_is_global() {
        assert!(entity(None).is_global());
        assert!(!entity(Some(Uuid::new_v4())).is_global());
    }
}
