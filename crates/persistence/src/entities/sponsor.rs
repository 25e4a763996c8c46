//! Sponsor entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SponsorResponse;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the sponsors table.
#[derive(Debug, Clone, FromRow)]
pub struct SponsorEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub company: String,
    pub contact_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub segment: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SponsorEntity {
    /// Display name used in email greetings: contact name, else company.
    pub fn display_name(&self) -> &str {
        self.contact_name.as_deref().unwrap_or(&self.company)
    }

    pub fn into_response(self) -> SponsorResponse {
        SponsorResponse {
            id: self.id,
            tenant_id: self.tenant_id,
            company: self.company,
            contact_name: self.contact_name,
            email: self.email,
            phone: self.phone,
            segment: self.segment,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}
