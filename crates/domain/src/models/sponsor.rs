//! Sponsor domain models.
//!
//! Sponsors are created either by a club admin (single create or import)
//! or by public-form self-registration, which is idempotent by
//! (tenant, email).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Maximum sponsors accepted in a single import request.
pub const MAX_IMPORT_BATCH: usize = 500;

/// Request to create a sponsor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateSponsorRequest {
    #[validate(length(min = 1, max = 160, message = "Company must be 1-160 characters"))]
    pub company: String,

    #[validate(length(max = 120, message = "Contact name must be at most 120 characters"))]
    pub contact_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    /// Commercial segment (e.g. "retail", "services").
    #[validate(length(max = 64, message = "Segment must be at most 64 characters"))]
    pub segment: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Request to update a sponsor. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSponsorRequest {
    #[validate(length(min = 1, max = 160, message = "Company must be 1-160 characters"))]
    pub company: Option<String>,

    #[validate(length(max = 120, message = "Contact name must be at most 120 characters"))]
    pub contact_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 64, message = "Segment must be at most 64 characters"))]
    pub segment: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Bulk sponsor import (club admin).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ImportSponsorsRequest {
    #[validate(length(min = 1, max = 500, message = "Import must contain 1-500 sponsors"))]
    #[validate(nested)]
    pub sponsors: Vec<CreateSponsorRequest>,
}

/// Sponsor representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SponsorResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sponsor() -> CreateSponsorRequest {
        CreateSponsorRequest {
            company: "Boulangerie Martin".to_string(),
            contact_name: Some("Claire Martin".to_string()),
            email: "claire@boulangerie-martin.fr".to_string(),
            phone: None,
            segment: Some("retail".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_create_sponsor_valid() {
        assert!(valid_sponsor().validate().is_ok());
    }

    #[test]
    fn test_create_sponsor_invalid_email() {
        let mut sponsor = valid_sponsor();
        sponsor.email = "nope".to_string();
        assert!(sponsor.validate().is_err());
    }

    #[test]
    fn test_create_sponsor_empty_company() {
        let mut sponsor = valid_sponsor();
        sponsor.company = String::new();
        assert!(sponsor.validate().is_err());
    }

    #[test]
    fn test_import_rejects_empty_batch() {
        let request = ImportSponsorsRequest { sponsors: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_import_validates_nested_sponsors() {
        let mut bad = valid_sponsor();
        bad.email = "broken".to_string();
        let request = ImportSponsorsRequest {
            sponsors: vec![valid_sponsor(), bad],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_import_accepts_valid_batch() {
        let request = ImportSponsorsRequest {
            sponsors: vec![valid_sponsor(), valid_sponsor()],
        };
        assert!(request.validate().is_ok());
    }
}
