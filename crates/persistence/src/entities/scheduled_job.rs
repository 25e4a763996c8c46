//! Scheduled job entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{InvitationJobPayload, JobResponse, JobStatus, JobType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the scheduled_jobs table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduledJobEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub campaign_id: Uuid,
    pub job_type: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub scheduled_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScheduledJobEntity {
    /// Parsed status; unknown values read as failed.
    pub fn status(&self) -> JobStatus {
        JobStatus::parse(&self.status).unwrap_or(JobStatus::Failed)
    }

    /// Parsed job type, when recognized.
    pub fn job_type(&self) -> Option<JobType> {
        JobType::parse(&self.job_type)
    }

    /// Deserializes the invitation payload stored with this job.
    pub fn invitation_payload(&self) -> Result<InvitationJobPayload, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }

    pub fn into_response(self) -> JobResponse {
        let status = self.status();
        let job_type = self.job_type().unwrap_or(JobType::CampaignInvitations);
        let sponsor_count = self
            .invitation_payload()
            .map(|p| p.sponsor_ids.len())
            .unwrap_or(0);
        JobResponse {
            id: self.id,
            tenant_id: self.tenant_id,
            campaign_id: self.campaign_id,
            job_type,
            status,
            sponsor_count,
            scheduled_at: self.scheduled_at,
            executed_at: self.executed_at,
            error_message: self.error_message,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> ScheduledJobEntity {
        let payload = InvitationJobPayload {
            campaign_id: Uuid::new_v4(),
            sponsor_ids: vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()],
            expiry_days: 30,
            reminder_days: vec![5],
        };
        ScheduledJobEntity {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            campaign_id: payload.campaign_id,
            job_type: "campaign_invitations".to_string(),
            payload: serde_json::to_value(&payload).unwrap(),
            status: "pending".to_string(),
            scheduled_at: Utc::now(),
            executed_at: None,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_payload_roundtrip() {
        let job = entity();
        let payload = job.invitation_payload().unwrap();
        assert_eq!(payload.sponsor_ids.len(), 3);
        assert_eq!(payload.expiry_days, 30);
        assert_eq!(payload.reminder_days, vec![5]);
    }

    #[test]
    fn test_corrupt_payload_is_error() {
        let mut job = entity();
        job.payload = serde_json::json!({"not": "a payload"});
        assert!(job.invitation_payload().is_err());
    }

    #[test]
    fn test_into_response_counts_sponsors() {
        let response = entity().into_response();
        assert_eq!(response.sponsor_count, 3);
        assert_eq!(response.status, JobStatus::Pending);
        assert_eq!(response.job_type, JobType::CampaignInvitations);
    }

    #[test]
    fn test_unknown_status_reads_as_failed() {
        let mut job = entity();
        job.status = "archived".to_string();
        assert_eq!(job.status(), JobStatus::Failed);
    }
}
