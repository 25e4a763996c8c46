//! Campaign domain models.
//!
//! A campaign describes an advertising-screen slot a club offers to
//! sponsors. Campaigns are created by club admins and read-only to
//! sponsors; publicly shared campaigns expose a slug-addressed page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to create a campaign.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Venue or screen location.
    #[validate(length(max = 160, message = "Location must be at most 160 characters"))]
    pub location: Option<String>,

    /// Screen type (e.g. "led_panel", "scoreboard").
    #[validate(length(max = 64, message = "Screen type must be at most 64 characters"))]
    pub screen_type: Option<String>,

    /// Estimated weekly footfall in front of the screen.
    #[validate(range(min = 0, message = "Footfall must be non-negative"))]
    pub footfall_estimate: Option<i32>,

    /// Suggested sponsorship price in euros.
    #[validate(custom(function = "crate::models::campaign::validate_optional_amount"))]
    pub price_hint: Option<f64>,

    /// Pledge deadline; campaigns without one use the follow-up reminder path.
    pub deadline: Option<DateTime<Utc>>,

    /// Whether the campaign has a public pledge page.
    #[serde(default)]
    pub is_public: bool,

    /// Slug for the public page; generated from the title when absent.
    #[validate(custom(function = "crate::models::campaign::validate_optional_slug"))]
    pub slug: Option<String>,
}

/// Request to update a campaign. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 160, message = "Location must be at most 160 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 64, message = "Screen type must be at most 64 characters"))]
    pub screen_type: Option<String>,

    #[validate(range(min = 0, message = "Footfall must be non-negative"))]
    pub footfall_estimate: Option<i32>,

    #[validate(custom(function = "crate::models::campaign::validate_optional_amount"))]
    pub price_hint: Option<f64>,

    pub deadline: Option<DateTime<Utc>>,

    pub is_public: Option<bool>,

    #[validate(custom(function = "crate::models::campaign::validate_optional_slug"))]
    pub slug: Option<String>,
}

/// Campaign representation returned to authenticated club admins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footfall_estimate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_hint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Campaign subset exposed on the anonymous public pledge page.
///
/// Deliberately omits tenant internals; only what the pledge form needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicCampaignResponse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footfall_estimate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_hint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub tenant_name: String,
}

pub(crate) fn validate_optional_amount(amount: f64) -> Result<(), validator::ValidationError> {
    shared::validation::validate_amount(amount)
}

pub(crate) fn validate_optional_slug(slug: &str) -> Result<(), validator::ValidationError> {
    shared::validation::validate_slug(slug)
}

/// Derives a public slug from a campaign title: lowercased, non-alphanumeric
/// runs collapsed to single dashes, truncated to 48 characters.
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= 48 {
            break;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCampaignRequest {
        CreateCampaignRequest {
            title: "Panneau LED tribune nord".to_string(),
            description: Some("Saison 2026-2027".to_string()),
            location: Some("Stade municipal".to_string()),
            screen_type: Some("led_panel".to_string()),
            footfall_estimate: Some(1200),
            price_hint: Some(1500.0),
            deadline: None,
            is_public: true,
            slug: Some("panneau-led-nord".to_string()),
        }
    }

    #[test]
    fn test_create_campaign_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_campaign_rejects_empty_title() {
        let mut request = valid_request();
        request.title = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_campaign_rejects_negative_price() {
        let mut request = valid_request();
        request.price_hint = Some(-10.0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_campaign_rejects_bad_slug() {
        let mut request = valid_request();
        request.slug = Some("Not A Slug".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(
            slug_from_title("Panneau LED tribune nord"),
            "panneau-led-tribune-nord"
        );
        assert_eq!(slug_from_title("  Écran -- 2026!  "), "cran-2026");
        assert_eq!(slug_from_title(""), "");
    }

    #[test]
    fn test_slug_from_title_truncates() {
        let long = "a".repeat(100);
        assert!(slug_from_title(&long).len() <= 48);
    }

    #[test]
    fn test_public_response_omits_internals() {
        let response = PublicCampaignResponse {
            title: "Panneau".to_string(),
            description: None,
            location: None,
            screen_type: None,
            footfall_estimate: None,
            price_hint: None,
            deadline: None,
            tenant_name: "FC Exemple".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("tenant_id"));
        assert!(json.contains("tenant_name"));
    }
}
