//! Invitation issuing.
//!
//! Turns a sponsor list into invitation rows, rendered emails and audit
//! events. Per-sponsor failures are isolated: one bad sponsor never aborts
//! the batch.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use domain::models::EmailEventType;
use domain::services::template_render::{self, TemplateSource, TenantBlocks};
use persistence::entities::{
    CampaignEntity, EmailTemplateEntity, InvitationEntity, SponsorEntity, TenantEntity,
};
use persistence::repositories::{
    calculate_invitation_expiry, generate_invitation_token, EmailEventRepository,
    InvitationRepository, ReminderRepository,
};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::services::email::{EmailMessage, EmailService};

/// Built-in invitation template, used when a tenant has no active one.
const DEFAULT_INVITATION_SUBJECT: &str = "Partenariat : {{campaign_title}}";
const DEFAULT_INVITATION_HTML: &str = "<p>Bonjour {{contact_name}},</p>\
<p>Le club vous propose un partenariat d'affichage pour <strong>{{campaign_title}}</strong>\
 ({{campaign_location}}).</p>\
<p><a href=\"{{invitation_url}}\">R&eacute;pondre &agrave; l'invitation</a></p>";
const DEFAULT_INVITATION_TEXT: &str = "Bonjour {{contact_name}},\n\n\
Le club vous propose un partenariat d'affichage pour {{campaign_title}} ({{campaign_location}}).\n\n\
Repondre a l'invitation : {{invitation_url}}";

/// Errors that abort a whole issuance.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("Sponsor list is empty")]
    EmptySponsorList,

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Everything an issuance renders and persists against.
pub struct IssueContext<'a> {
    pub tenant: &'a TenantEntity,
    pub campaign: &'a CampaignEntity,
    /// Active invitation template; the built-in default when absent.
    pub template: Option<&'a EmailTemplateEntity>,
    pub expiry_days: i32,
    /// Day offsets at which pending reminder rows are scheduled.
    pub reminder_days: &'a [i32],
}

/// Outcome of one issuance batch.
#[derive(Debug, Default)]
pub struct IssueOutcome {
    pub invitations: Vec<InvitationEntity>,
    pub emails_sent: u32,
    pub errors: Vec<String>,
}

/// Issues invitations for a campaign, one sponsor at a time.
#[derive(Clone)]
pub struct InvitationIssuer {
    pool: PgPool,
    email: EmailService,
    public_base_url: String,
    sponsor_delay: Duration,
}

impl InvitationIssuer {
    /// Creates a new invitation issuer.
    pub fn new(
        pool: PgPool,
        email: EmailService,
        public_base_url: String,
        sponsor_delay: Duration,
    ) -> Self {
        Self {
            pool,
            email,
            public_base_url,
            sponsor_delay,
        }
    }

    /// Issues one invitation per sponsor.
    ///
    /// Per sponsor: insert the invitation, schedule configured reminders,
    /// render and send the email, record a `sent` audit event. Failures
    /// are recorded as `bounced` audit events and the loop continues with
    /// the next sponsor. A fixed pause between sponsors throttles the
    /// provider.
    pub async fn issue(
        &self,
        ctx: &IssueContext<'_>,
        sponsors: &[SponsorEntity],
    ) -> Result<IssueOutcome, IssueError> {
        if sponsors.is_empty() {
            return Err(IssueError::EmptySponsorList);
        }

        let invitation_repo = InvitationRepository::new(self.pool.clone());
        let reminder_repo = ReminderRepository::new(self.pool.clone());
        let event_repo = EmailEventRepository::new(self.pool.clone());

        let mut outcome = IssueOutcome::default();

        for (index, sponsor) in sponsors.iter().enumerate() {
            if index > 0 && !self.sponsor_delay.is_zero() {
                tokio::time::sleep(self.sponsor_delay).await;
            }

            let token = generate_invitation_token();
            let expires_at = calculate_invitation_expiry(ctx.expiry_days);

            let invitation = match invitation_repo
                .create(ctx.campaign.id, sponsor.id, &sponsor.email, &token, expires_at)
                .await
            {
                Ok(invitation) => invitation,
                Err(e) => {
                    warn!(
                        sponsor_id = %sponsor.id,
                        email = %sponsor.email,
                        error = %e,
                        "Invitation insert failed"
                    );
                    self.record_event(
                        &event_repo,
                        ctx,
                        None,
                        Some(sponsor.id),
                        EmailEventType::Bounced,
                        serde_json::json!({
                            "failure_reason": "invitation_creation_error",
                            "email": sponsor.email,
                            "error": e.to_string(),
                        }),
                    )
                    .await;
                    outcome
                        .errors
                        .push(format!("{}: invitation_creation_error", sponsor.email));
                    continue;
                }
            };

            for &days in ctx.reminder_days {
                let scheduled_for = Utc::now() + ChronoDuration::days(days as i64);
                if let Err(e) = reminder_repo
                    .create_scheduled(invitation.id, scheduled_for)
                    .await
                {
                    warn!(
                        invitation_id = %invitation.id,
                        days = days,
                        error = %e,
                        "Reminder insert failed"
                    );
                }
            }

            let rendered = self.render_invitation(ctx, sponsor, &token);

            let message = EmailMessage {
                to: sponsor.email.clone(),
                to_name: sponsor.contact_name.clone(),
                subject: rendered.subject.clone(),
                html: rendered.html,
                text: rendered.text,
            };

            if let Err(e) = self.email.send(message).await {
                warn!(
                    invitation_id = %invitation.id,
                    email = %sponsor.email,
                    error = %e,
                    "Invitation email send failed"
                );
                self.record_event(
                    &event_repo,
                    ctx,
                    Some(invitation.id),
                    Some(sponsor.id),
                    EmailEventType::Bounced,
                    serde_json::json!({
                        "failure_reason": "email_send_error",
                        "email": sponsor.email,
                        "error": e.to_string(),
                    }),
                )
                .await;
                outcome
                    .errors
                    .push(format!("{}: email_send_error", sponsor.email));
                outcome.invitations.push(invitation);
                continue;
            }

            self.record_event(
                &event_repo,
                ctx,
                Some(invitation.id),
                Some(sponsor.id),
                EmailEventType::Sent,
                serde_json::json!({
                    "subject": rendered.subject,
                    "to": sponsor.email,
                }),
            )
            .await;

            outcome.emails_sent += 1;
            outcome.invitations.push(invitation);
        }

        info!(
            campaign_id = %ctx.campaign.id,
            sponsors = sponsors.len(),
            emails_sent = outcome.emails_sent,
            errors = outcome.errors.len(),
            "Issued invitations"
        );

        Ok(outcome)
    }

    /// Renders the invitation email for one sponsor.
    fn render_invitation(
        &self,
        ctx: &IssueContext<'_>,
        sponsor: &SponsorEntity,
        token: &str,
    ) -> template_render::RenderedEmail {
        let source = match ctx.template {
            Some(t) => TemplateSource {
                subject: &t.subject,
                html_body: &t.html_body,
                text_body: &t.text_body,
            },
            None => TemplateSource {
                subject: DEFAULT_INVITATION_SUBJECT,
                html_body: DEFAULT_INVITATION_HTML,
                text_body: DEFAULT_INVITATION_TEXT,
            },
        };

        let variables = invitation_variables(
            ctx.campaign,
            sponsor,
            &invitation_url(&self.public_base_url, token),
        );

        let blocks = TenantBlocks {
            signature_html: ctx.tenant.signature_html.as_deref(),
            legal_markdown: ctx.tenant.legal_markdown.as_deref(),
        };

        template_render::render(&source, &variables, &blocks)
    }

    async fn record_event(
        &self,
        event_repo: &EmailEventRepository,
        ctx: &IssueContext<'_>,
        invitation_id: Option<uuid::Uuid>,
        sponsor_id: Option<uuid::Uuid>,
        event_type: EmailEventType,
        event_data: serde_json::Value,
    ) {
        if let Err(e) = event_repo
            .record(
                invitation_id,
                ctx.campaign.id,
                sponsor_id,
                ctx.tenant.id,
                event_type.as_str(),
                Some(&event_data),
            )
            .await
        {
            warn!(
                campaign_id = %ctx.campaign.id,
                event_type = event_type.as_str(),
                error = %e,
                "Email event insert failed"
            );
        }
    }
}

/// Builds the variable map an invitation email renders against.
pub fn invitation_variables(
    campaign: &CampaignEntity,
    sponsor: &SponsorEntity,
    invitation_url: &str,
) -> HashMap<String, String> {
    let mut variables = HashMap::new();
    variables.insert(
        "contact_name".to_string(),
        sponsor.display_name().to_string(),
    );
    variables.insert("company".to_string(), sponsor.company.clone());
    variables.insert("campaign_title".to_string(), campaign.title.clone());
    variables.insert(
        "campaign_location".to_string(),
        campaign.location.clone().unwrap_or_default(),
    );
    variables.insert("invitation_url".to_string(), invitation_url.to_string());
    if let Some(deadline) = campaign.deadline {
        variables.insert(
            "deadline".to_string(),
            deadline.format("%d/%m/%Y").to_string(),
        );
    }
    variables
}

/// Builds the sponsor-facing invitation URL for a token.
pub fn invitation_url(public_base_url: &str, token: &str) -> String {
    format!("{}/invite/{}", public_base_url.trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn campaign(deadline: Option<chrono::DateTime<Utc>>) -> CampaignEntity {
        CampaignEntity {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            title: "Panneau LED".to_string(),
            description: None,
            location: Some("Stade municipal".to_string()),
            screen_type: None,
            footfall_estimate: None,
            price_hint: None,
            deadline,
            is_public: false,
            slug: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sponsor() -> SponsorEntity {
        SponsorEntity {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            company: "Boulangerie Martin".to_string(),
            contact_name: Some("Claire Martin".to_string()),
            email: "claire@boulangerie-martin.fr".to_string(),
            phone: None,
            segment: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_invitation_url_joins_cleanly() {
        assert_eq!(
            invitation_url("https://app.example.com", "tok123"),
            "https://app.example.com/invite/tok123"
        );
        assert_eq!(
            invitation_url("https://app.example.com/", "tok123"),
            "https://app.example.com/invite/tok123"
        );
    }

    #[test]
    fn test_invitation_variables_complete() {
        let variables = invitation_variables(
            &campaign(None),
            &sponsor(),
            "https://app.example.com/invite/tok123",
        );
        assert_eq!(variables["contact_name"], "Claire Martin");
        assert_eq!(variables["company"], "Boulangerie Martin");
        assert_eq!(variables["campaign_title"], "Panneau LED");
        assert_eq!(variables["campaign_location"], "Stade municipal");
        assert_eq!(
            variables["invitation_url"],
            "https://app.example.com/invite/tok123"
        );
        assert!(!variables.contains_key("deadline"));
    }

    #[test]
    fn test_invitation_variables_include_deadline() {
        let deadline = Utc::now() + chrono::Duration::days(20);
        let variables = invitation_variables(
            &campaign(Some(deadline)),
            &sponsor(),
            "https://app.example.com/invite/tok123",
        );
        assert_eq!(variables["deadline"], deadline.format("%d/%m/%Y").to_string());
    }

    #[test]
    fn test_default_template_substitutes_fully() {
        let source = TemplateSource {
            subject: DEFAULT_INVITATION_SUBJECT,
            html_body: DEFAULT_INVITATION_HTML,
            text_body: DEFAULT_INVITATION_TEXT,
        };
        let variables = invitation_variables(
            &campaign(None),
            &sponsor(),
            "https://app.example.com/invite/tok123",
        );
        let rendered = template_render::render(&source, &variables, &TenantBlocks::default());

        assert_eq!(rendered.subject, "Partenariat : Panneau LED");
        assert!(!rendered.html.contains("{{"));
        assert!(!rendered.text.contains("{{"));
        assert!(rendered
            .html
            .contains("https://app.example.com/invite/tok123"));
    }
}
