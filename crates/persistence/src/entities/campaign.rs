//! Campaign entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{CampaignResponse, PublicCampaignResponse};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the campaigns table.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub screen_type: Option<String>,
    pub footfall_estimate: Option<i32>,
    pub price_hint: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CampaignEntity {
    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn into_response(self) -> CampaignResponse {
        CampaignResponse {
            id: self.id,
            tenant_id: self.tenant_id,
            title: self.title,
            description: self.description,
            location: self.location,
            screen_type: self.screen_type,
            footfall_estimate: self.footfall_estimate,
            price_hint: self.price_hint,
            deadline: self.deadline,
            is_public: self.is_public,
            slug: self.slug,
            created_at: self.created_at,
        }
    }

    /// Public subset for the anonymous pledge page.
    pub fn into_public_response(self, tenant_name: String) -> PublicCampaignResponse {
        PublicCampaignResponse {
            title: self.title,
            description: self.description,
            location: self.location,
            screen_type: self.screen_type,
            footfall_estimate: self.footfall_estimate,
            price_hint: self.price_hint,
            deadline: self.deadline,
            tenant_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entity(deadline: Option<DateTime<Utc>>) -> CampaignEntity {
        CampaignEntity {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            title: "Panneau LED tribune nord".to_string(),
            description: None,
            location: Some("Stade municipal".to_string()),
            screen_type: Some("led_panel".to_string()),
            footfall_estimate: Some(1200),
            price_hint: Some(1500.0),
            deadline,
            is_public: true,
            slug: Some("panneau-led-nord".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_deadline() {
        assert!(!entity(None).has_deadline());
        assert!(entity(Some(Utc::now() + Duration::days(30))).has_deadline());
    }

    #[test]
    fn test_into_public_response_hides_tenant_id() {
        let public = entity(None).into_public_response("FC Exemple".to_string());
        assert_eq!(public.tenant_name, "FC Exemple");
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("tenant_id"));
    }
}
