//! Invitation job runner.
//!
//! Claims due scheduled jobs and drives the invitation issuer over each
//! job's sponsor payload. A job completes when at least one sponsor got
//! an email; partial failures still complete, with an error summary for
//! operator inspection. Nothing is retried automatically.

use domain::models::{JobStatus, TemplateType};
use metrics::counter;
use persistence::entities::ScheduledJobEntity;
use persistence::repositories::{
    CampaignRepository, EmailTemplateRepository, ScheduledJobRepository, SponsorRepository,
    TenantRepository,
};
use sqlx::PgPool;
use tracing::{info, warn};

use super::scheduler::{Job, JobFrequency};
use crate::services::invitation_issuer::{InvitationIssuer, IssueContext, IssueError};

/// Background job that processes pending invitation jobs.
pub struct InvitationJobRunner {
    pool: PgPool,
    issuer: InvitationIssuer,
    batch_size: i64,
    interval_secs: u64,
}

impl InvitationJobRunner {
    /// Creates a new runner.
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `issuer` - Invitation issuer driving per-sponsor work
    /// * `batch_size` - Jobs claimed per pass
    /// * `interval_secs` - Seconds between passes
    pub fn new(
        pool: PgPool,
        issuer: InvitationIssuer,
        batch_size: i64,
        interval_secs: u64,
    ) -> Self {
        Self {
            pool,
            issuer,
            batch_size,
            interval_secs,
        }
    }

    /// Processes one batch of due jobs. Returns the number of jobs run.
    pub async fn process_due_jobs(&self) -> Result<u32, sqlx::Error> {
        let job_repo = ScheduledJobRepository::new(self.pool.clone());
        let due = job_repo.find_due(self.batch_size).await?;
        let mut processed = 0u32;

        for job in due {
            // atomic conditional update: a concurrent pass keeps at most
            // one winner per job
            if !job_repo.claim(job.id).await? {
                continue;
            }

            self.run_job(&job_repo, &job).await;
            processed += 1;
        }

        if processed > 0 {
            info!(processed = processed, "Processed invitation jobs");
        }

        Ok(processed)
    }

    /// Runs one claimed job to its terminal status.
    async fn run_job(&self, job_repo: &ScheduledJobRepository, job: &ScheduledJobEntity) {
        counter!("invitation_jobs_claimed_total").increment(1);

        let payload = match job.invitation_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(job_id = %job.id, error = %e, "Job payload is corrupt");
                self.finish(job_repo, job, JobStatus::Failed, Some("corrupt payload"))
                    .await;
                return;
            }
        };

        let tenant = match TenantRepository::new(self.pool.clone())
            .find_by_id(job.tenant_id)
            .await
        {
            Ok(Some(tenant)) => tenant,
            Ok(None) => {
                self.finish(job_repo, job, JobStatus::Failed, Some("tenant not found"))
                    .await;
                return;
            }
            Err(e) => {
                let message = format!("tenant load failed: {}", e);
                self.finish(job_repo, job, JobStatus::Failed, Some(&message))
                    .await;
                return;
            }
        };

        let campaign = match CampaignRepository::new(self.pool.clone())
            .find_by_id_and_tenant(payload.campaign_id, job.tenant_id)
            .await
        {
            Ok(Some(campaign)) => campaign,
            Ok(None) => {
                self.finish(job_repo, job, JobStatus::Failed, Some("campaign not found"))
                    .await;
                return;
            }
            Err(e) => {
                let message = format!("campaign load failed: {}", e);
                self.finish(job_repo, job, JobStatus::Failed, Some(&message))
                    .await;
                return;
            }
        };

        let sponsors = match SponsorRepository::new(self.pool.clone())
            .find_by_ids(job.tenant_id, &payload.sponsor_ids)
            .await
        {
            Ok(sponsors) => sponsors,
            Err(e) => {
                let message = format!("sponsor load failed: {}", e);
                self.finish(job_repo, job, JobStatus::Failed, Some(&message))
                    .await;
                return;
            }
        };

        let template = EmailTemplateRepository::new(self.pool.clone())
            .find_active(job.tenant_id, TemplateType::Invitation.as_str())
            .await
            .unwrap_or_else(|e| {
                warn!(job_id = %job.id, error = %e, "Template lookup failed, using default");
                None
            });

        let ctx = IssueContext {
            tenant: &tenant,
            campaign: &campaign,
            template: template.as_ref(),
            expiry_days: payload.expiry_days,
            reminder_days: &payload.reminder_days,
        };

        match self.issuer.issue(&ctx, &sponsors).await {
            Ok(outcome) => {
                counter!("invitation_emails_sent_total").increment(outcome.emails_sent as u64);

                let status = if outcome.emails_sent > 0 {
                    JobStatus::Completed
                } else {
                    JobStatus::Failed
                };
                let error_message = if outcome.errors.is_empty() {
                    None
                } else {
                    Some(format!(
                        "{} of {} sponsors failed",
                        outcome.errors.len(),
                        sponsors.len()
                    ))
                };

                info!(
                    job_id = %job.id,
                    emails_sent = outcome.emails_sent,
                    errors = outcome.errors.len(),
                    status = status.as_str(),
                    "Invitation job finished"
                );

                self.finish(job_repo, job, status, error_message.as_deref())
                    .await;
            }
            Err(IssueError::EmptySponsorList) => {
                self.finish(job_repo, job, JobStatus::Failed, Some("no sponsors in payload"))
                    .await;
            }
            Err(IssueError::Storage(e)) => {
                let message = format!("storage error: {}", e);
                self.finish(job_repo, job, JobStatus::Failed, Some(&message))
                    .await;
            }
        }
    }

    async fn finish(
        &self,
        job_repo: &ScheduledJobRepository,
        job: &ScheduledJobEntity,
        status: JobStatus,
        error_message: Option<&str>,
    ) {
        if status == JobStatus::Failed {
            counter!("invitation_jobs_failed_total").increment(1);
        }
        if let Err(e) = job_repo.finish(job.id, status.as_str(), error_message).await {
            warn!(job_id = %job.id, error = %e, "Failed to record job outcome");
        }
    }
}

#[async_trait::async_trait]
impl Job for InvitationJobRunner {
    fn name(&self) -> &'static str {
        "invitation_runner"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs)
    }

    async fn execute(&self) -> Result<(), String> {
        self.process_due_jobs()
            .await
            .map(|_| ())
            .map_err(|e| format!("Failed to process invitation jobs: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_job_name() {
        // name is stable: dashboards and log filters key on it
        assert_eq!("invitation_runner", "invitation_runner");
    }

    #[test]
    fn test_frequency_follows_configuration() {
        let freq = JobFrequency::Seconds(60);
        assert_eq!(freq.duration(), Duration::from_secs(60));
    }

    #[test]
    fn test_batch_size_bounds() {
        let batch_size: i64 = 10;
        assert!(batch_size >= 1, "Batch size too small");
        assert!(batch_size <= 100, "Batch size too large");
    }
}
