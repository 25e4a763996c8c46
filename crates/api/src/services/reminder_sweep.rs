//! Reminder sweeping.
//!
//! Two scans per pass: invitations of campaigns without a deadline get a
//! follow-up exactly 5 days after sending; invitations of campaigns with a
//! deadline get a reminder exactly 10 days before it. A pledge through any
//! path suppresses the reminder. The exact-day equality means a pass must
//! run at least once per 24-hour window or the reminder is missed; there
//! is no catch-up.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use domain::models::{EmailEventType, ReminderKind, TemplateType};
use domain::services::template_render::{self, TemplateSource, TenantBlocks};
use persistence::entities::TenantEntity;
use persistence::repositories::{
    EmailEventRepository, EmailTemplateRepository, InvitationRepository, PledgeRepository,
    ReminderRepository, SweepRow, TenantRepository,
};
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::email::{EmailMessage, EmailService};
use crate::services::invitation_issuer::invitation_url;

/// Days after sending at which the follow-up fires (no-deadline campaigns).
pub const FOLLOW_UP_DAY: i64 = 5;

/// Days before the deadline at which the deadline reminder fires.
pub const DEADLINE_REMINDER_DAY: i64 = 10;

/// Counters from one sweep pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub examined: u32,
    pub sent_follow_up: u32,
    pub sent_deadline: u32,
    pub skipped_pledged: u32,
    pub skipped_no_template: u32,
    pub errors: u32,
}

/// Periodic reminder sweeper.
#[derive(Clone)]
pub struct ReminderSweeper {
    pool: PgPool,
    email: EmailService,
    public_base_url: String,
}

impl ReminderSweeper {
    /// Creates a new reminder sweeper.
    pub fn new(pool: PgPool, email: EmailService, public_base_url: String) -> Self {
        Self {
            pool,
            email,
            public_base_url,
        }
    }

    /// Runs both scans once.
    pub async fn run(&self) -> Result<SweepStats, sqlx::Error> {
        let invitation_repo = InvitationRepository::new(self.pool.clone());
        let now = Utc::now();
        let mut stats = SweepStats::default();
        let mut tenants: HashMap<Uuid, TenantEntity> = HashMap::new();

        let follow_up_rows = invitation_repo.sweep_rows_without_deadline().await?;
        for row in follow_up_rows {
            stats.examined += 1;
            if !follow_up_due(&row, now) {
                continue;
            }
            self.fire(&row, ReminderKind::Reminder5d, &mut tenants, &mut stats)
                .await;
        }

        let deadline_rows = invitation_repo.sweep_rows_with_deadline().await?;
        for row in deadline_rows {
            stats.examined += 1;
            if !deadline_reminder_due(&row, now) {
                continue;
            }
            self.fire(&row, ReminderKind::Reminder10d, &mut tenants, &mut stats)
                .await;
        }

        info!(
            examined = stats.examined,
            sent_follow_up = stats.sent_follow_up,
            sent_deadline = stats.sent_deadline,
            skipped_pledged = stats.skipped_pledged,
            skipped_no_template = stats.skipped_no_template,
            errors = stats.errors,
            "Reminder sweep completed"
        );

        Ok(stats)
    }

    /// Fires one reminder: pledge and dedup checks, template lookup,
    /// render, send, audit. Errors are isolated per row.
    async fn fire(
        &self,
        row: &SweepRow,
        kind: ReminderKind,
        tenants: &mut HashMap<Uuid, TenantEntity>,
        stats: &mut SweepStats,
    ) {
        let pledge_repo = PledgeRepository::new(self.pool.clone());
        let reminder_repo = ReminderRepository::new(self.pool.clone());
        let template_repo = EmailTemplateRepository::new(self.pool.clone());
        let event_repo = EmailEventRepository::new(self.pool.clone());

        // already fired today or on an earlier pass
        match reminder_repo.has_fired(row.invitation_id, kind.as_str()).await {
            Ok(true) => return,
            Ok(false) => {}
            Err(e) => {
                warn!(invitation_id = %row.invitation_id, error = %e, "Reminder dedup check failed");
                stats.errors += 1;
                return;
            }
        }

        match pledge_repo
            .exists_for_campaign_sponsor(row.campaign_id, row.sponsor_id)
            .await
        {
            Ok(true) => {
                stats.skipped_pledged += 1;
                if let Err(e) = reminder_repo
                    .skip_pending_for_invitation(row.invitation_id)
                    .await
                {
                    warn!(invitation_id = %row.invitation_id, error = %e, "Reminder skip failed");
                }
                return;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(invitation_id = %row.invitation_id, error = %e, "Pledge check failed");
                stats.errors += 1;
                return;
            }
        }

        let template_type = match kind {
            ReminderKind::Reminder5d => TemplateType::Reminder5d,
            ReminderKind::Reminder10d => TemplateType::Reminder10d,
            ReminderKind::Scheduled => return,
        };

        let template = match template_repo
            .find_active(row.tenant_id, template_type.as_str())
            .await
        {
            Ok(Some(template)) => template,
            Ok(None) => {
                // no active template: silently skip this invitation
                debug!(
                    invitation_id = %row.invitation_id,
                    template_type = template_type.as_str(),
                    "No active reminder template, skipping"
                );
                stats.skipped_no_template += 1;
                return;
            }
            Err(e) => {
                warn!(invitation_id = %row.invitation_id, error = %e, "Template lookup failed");
                stats.errors += 1;
                return;
            }
        };

        let tenant = match self.tenant_cached(tenants, row.tenant_id).await {
            Some(tenant) => tenant,
            None => {
                stats.errors += 1;
                return;
            }
        };

        let source = TemplateSource {
            subject: &template.subject,
            html_body: &template.html_body,
            text_body: &template.text_body,
        };
        let variables = sweep_variables(row, &invitation_url(&self.public_base_url, &row.token));
        let blocks = TenantBlocks {
            signature_html: tenant.signature_html.as_deref(),
            legal_markdown: tenant.legal_markdown.as_deref(),
        };
        let rendered = template_render::render(&source, &variables, &blocks);

        let message = EmailMessage {
            to: row.email.clone(),
            to_name: row.contact_name.clone(),
            subject: rendered.subject.clone(),
            html: rendered.html,
            text: rendered.text,
        };

        if let Err(e) = self.email.send(message).await {
            warn!(
                invitation_id = %row.invitation_id,
                kind = kind.as_str(),
                error = %e,
                "Reminder email send failed"
            );
            self.record_event(
                &event_repo,
                row,
                EmailEventType::Bounced,
                serde_json::json!({
                    "failure_reason": "reminder_send_error",
                    "reminder": kind.as_str(),
                    "error": e.to_string(),
                }),
            )
            .await;
            stats.errors += 1;
            return;
        }

        self.record_event(
            &event_repo,
            row,
            EmailEventType::Sent,
            serde_json::json!({
                "reminder": kind.as_str(),
                "subject": rendered.subject,
                "to": row.email,
            }),
        )
        .await;

        if let Err(e) = reminder_repo
            .record_fired(row.invitation_id, kind.as_str(), Utc::now())
            .await
        {
            warn!(invitation_id = %row.invitation_id, error = %e, "Reminder bookkeeping failed");
        }

        match kind {
            ReminderKind::Reminder5d => stats.sent_follow_up += 1,
            ReminderKind::Reminder10d => stats.sent_deadline += 1,
            ReminderKind::Scheduled => {}
        }
    }

    async fn tenant_cached(
        &self,
        tenants: &mut HashMap<Uuid, TenantEntity>,
        tenant_id: Uuid,
    ) -> Option<TenantEntity> {
        if let Some(tenant) = tenants.get(&tenant_id) {
            return Some(tenant.clone());
        }
        match TenantRepository::new(self.pool.clone()).find_by_id(tenant_id).await {
            Ok(Some(tenant)) => {
                tenants.insert(tenant_id, tenant.clone());
                Some(tenant)
            }
            Ok(None) => {
                warn!(tenant_id = %tenant_id, "Tenant missing during sweep");
                None
            }
            Err(e) => {
                warn!(tenant_id = %tenant_id, error = %e, "Tenant load failed during sweep");
                None
            }
        }
    }

    async fn record_event(
        &self,
        event_repo: &EmailEventRepository,
        row: &SweepRow,
        event_type: EmailEventType,
        event_data: serde_json::Value,
    ) {
        if let Err(e) = event_repo
            .record(
                Some(row.invitation_id),
                row.campaign_id,
                Some(row.sponsor_id),
                row.tenant_id,
                event_type.as_str(),
                Some(&event_data),
            )
            .await
        {
            warn!(
                invitation_id = %row.invitation_id,
                event_type = event_type.as_str(),
                error = %e,
                "Email event insert failed"
            );
        }
    }
}

/// Whether the follow-up fires for this row: exactly 5 whole days since
/// the invitation was sent. Not day 4, not day 6.
pub fn follow_up_due(row: &SweepRow, now: DateTime<Utc>) -> bool {
    (now - row.invitation_created_at).num_days() == FOLLOW_UP_DAY
}

/// Whether the deadline reminder fires: exactly 10 whole days left.
pub fn deadline_reminder_due(row: &SweepRow, now: DateTime<Utc>) -> bool {
    match row.deadline {
        Some(deadline) => (deadline - now).num_days() == DEADLINE_REMINDER_DAY,
        None => false,
    }
}

/// Variable map a reminder email renders against.
fn sweep_variables(row: &SweepRow, url: &str) -> HashMap<String, String> {
    let mut variables = HashMap::new();
    variables.insert(
        "contact_name".to_string(),
        row.contact_name
            .clone()
            .unwrap_or_else(|| row.company.clone()),
    );
    variables.insert("company".to_string(), row.company.clone());
    variables.insert("campaign_title".to_string(), row.campaign_title.clone());
    variables.insert("invitation_url".to_string(), url.to_string());
    if let Some(deadline) = row.deadline {
        variables.insert(
            "deadline".to_string(),
            deadline.format("%d/%m/%Y").to_string(),
        );
    }
    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(
        now: DateTime<Utc>,
        created_hours_ago: i64,
        deadline_in_hours: Option<i64>,
    ) -> SweepRow {
        SweepRow {
            invitation_id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            sponsor_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            email: "claire@boulangerie-martin.fr".to_string(),
            token: "JCdhsQ4tPmXw8rBn5kVfL2yTgZa7NeHp".to_string(),
            invitation_created_at: now - Duration::hours(created_hours_ago),
            deadline: deadline_in_hours.map(|h| now + Duration::hours(h)),
            campaign_title: "Panneau LED".to_string(),
            company: "Boulangerie Martin".to_string(),
            contact_name: Some("Claire Martin".to_string()),
        }
    }

    #[test]
    fn test_follow_up_fires_exactly_day_five() {
        let now = Utc::now();
        // 5 days + 1 hour elapsed: floor is 5
        assert!(follow_up_due(&row(now, 5 * 24 + 1, None), now));
        // 4 days 23 hours elapsed: floor is 4
        assert!(!follow_up_due(&row(now, 4 * 24 + 23, None), now));
        // 6 days elapsed: floor is 6
        assert!(!follow_up_due(&row(now, 6 * 24, None), now));
    }

    #[test]
    fn test_deadline_reminder_fires_exactly_day_ten() {
        let now = Utc::now();
        // 10 days + 1 hour remaining: floor is 10
        assert!(deadline_reminder_due(&row(now, 0, Some(10 * 24 + 1)), now));
        // 9 days 23 hours remaining: floor is 9
        assert!(!deadline_reminder_due(&row(now, 0, Some(9 * 24 + 23)), now));
        // 11 days 1 hour remaining: floor is 11
        assert!(!deadline_reminder_due(&row(now, 0, Some(11 * 24 + 1)), now));
    }

    #[test]
    fn test_deadline_reminder_never_fires_without_deadline() {
        let now = Utc::now();
        assert!(!deadline_reminder_due(&row(now, 0, None), now));
    }

    #[test]
    fn test_sweep_variables() {
        let r = row(Utc::now(), 0, Some(10 * 24));
        let variables = sweep_variables(&r, "https://app.example.com/invite/tok");
        assert_eq!(variables["contact_name"], "Claire Martin");
        assert_eq!(variables["campaign_title"], "Panneau LED");
        assert_eq!(
            variables["invitation_url"],
            "https://app.example.com/invite/tok"
        );
        assert!(variables.contains_key("deadline"));
    }

    #[test]
    fn test_sweep_variables_fall_back_to_company() {
        let mut r = row(Utc::now(), 0, None);
        r.contact_name = None;
        let variables = sweep_variables(&r, "https://x");
        assert_eq!(variables["contact_name"], "Boulangerie Martin");
        assert!(!variables.contains_key("deadline"));
    }
}
