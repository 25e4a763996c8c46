//! Scheduled job domain models.
//!
//! A scheduled job carries a sponsor list plus invitation settings and is
//! consumed exactly once by the job runner under an atomic claim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Job lifecycle status.
///
/// Transitions: `pending -(claim)-> processing -> completed | failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(JobStatus::Pending),
            "processing" => Some(JobStatus::Processing),
            "completed" => Some(JobStatus::Completed),
            "failed" => Some(JobStatus::Failed),
            _ => None,
        }
    }
}

/// Kind of work a scheduled job performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    CampaignInvitations,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::CampaignInvitations => "campaign_invitations",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "campaign_invitations" => Some(JobType::CampaignInvitations),
            _ => None,
        }
    }
}

/// Payload stored with a campaign-invitation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationJobPayload {
    pub campaign_id: Uuid,
    pub sponsor_ids: Vec<Uuid>,
    pub expiry_days: i32,
    /// Day offsets after sending at which reminder rows are scheduled.
    #[serde(default)]
    pub reminder_days: Vec<i32>,
}

/// Request to schedule a campaign-invitation job.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleInvitationJobRequest {
    pub campaign_id: Uuid,

    #[validate(length(min = 1, max = 500, message = "Job must target 1-500 sponsors"))]
    pub sponsor_ids: Vec<Uuid>,

    /// Invitation expiry in days (1-180, default 30).
    #[validate(range(min = 1, max = 180, message = "Expiry must be between 1 and 180 days"))]
    pub expiry_days: Option<i32>,

    /// Reminder day offsets; each between 1 and 90.
    pub reminder_days: Option<Vec<i32>>,

    /// When the job becomes due; immediately when absent.
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl ScheduleInvitationJobRequest {
    /// Validates reminder day offsets beyond what the derive covers.
    pub fn validate_reminder_days(&self) -> Result<(), String> {
        if let Some(days) = &self.reminder_days {
            if days.len() > 5 {
                return Err("At most 5 reminder offsets are allowed".to_string());
            }
            for &d in days {
                if !(1..=90).contains(&d) {
                    return Err(format!("Reminder offset {} is outside 1-90 days", d));
                }
            }
        }
        Ok(())
    }
}

/// Job representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JobResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub campaign_id: Uuid,
    pub job_type: JobType,
    pub status: JobStatus,
    pub sponsor_count: usize,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing jobs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListJobsQuery {
    /// Filter by status; absent means all.
    pub status: Option<String>,

    pub page: Option<i64>,

    pub per_page: Option<i64>,
}

impl ListJobsQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(50).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }

    pub fn status_filter(&self) -> Option<JobStatus> {
        self.status.as_deref().and_then(JobStatus::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_roundtrip() {
        for status in [
            JobStatus::Pending,
            JobStatus::Processing,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("done"), None);
    }

    #[test]
    fn test_job_type_roundtrip() {
        assert_eq!(
            JobType::parse("campaign_invitations"),
            Some(JobType::CampaignInvitations)
        );
        assert_eq!(JobType::parse("unknown"), None);
    }

    #[test]
    fn test_payload_serialization_roundtrip() {
        let payload = InvitationJobPayload {
            campaign_id: Uuid::new_v4(),
            sponsor_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            expiry_days: 30,
            reminder_days: vec![5, 12],
        };
        let json = serde_json::to_value(&payload).unwrap();
        let back: InvitationJobPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back.sponsor_ids.len(), 2);
        assert_eq!(back.reminder_days, vec![5, 12]);
    }

    #[test]
    fn test_payload_reminder_days_default_empty() {
        let json = serde_json::json!({
            "campaign_id": Uuid::new_v4(),
            "sponsor_ids": [Uuid::new_v4()],
            "expiry_days": 14,
        });
        let payload: InvitationJobPayload = serde_json::from_value(json).unwrap();
        assert!(payload.reminder_days.is_empty());
    }

    #[test]
    fn test_schedule_request_rejects_empty_sponsors() {
        let request = ScheduleInvitationJobRequest {
            campaign_id: Uuid::new_v4(),
            sponsor_ids: vec![],
            expiry_days: None,
            reminder_days: None,
            scheduled_at: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_schedule_request_reminder_day_bounds() {
        let mut request = ScheduleInvitationJobRequest {
            campaign_id: Uuid::new_v4(),
            sponsor_ids: vec![Uuid::new_v4()],
            expiry_days: Some(30),
            reminder_days: Some(vec![5, 10]),
            scheduled_at: None,
        };
        assert!(request.validate_reminder_days().is_ok());

        request.reminder_days = Some(vec![0]);
        assert!(request.validate_reminder_days().is_err());

        request.reminder_days = Some(vec![91]);
        assert!(request.validate_reminder_days().is_err());

        request.reminder_days = Some(vec![1, 2, 3, 4, 5, 6]);
        assert!(request.validate_reminder_days().is_err());
    }
}
