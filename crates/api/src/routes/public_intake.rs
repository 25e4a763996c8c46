//! Public response intake.
//!
//! Anonymous entry points: the slug-addressed campaign page, the
//! token-addressed invitation page, pledge submission on both, and the
//! email provider callback. The invitation token is the sole
//! authorization artifact for the token path.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use domain::models::{
    PledgeSource, ProviderEventRequest, PublicCampaignResponse, SubmitPledgeRequest,
    SubmitPledgeResponse,
};
use persistence::entities::{CampaignEntity, TenantEntity};
use persistence::repositories::{
    CampaignRepository, EmailEventRepository, InvitationRepository, PledgeRepository,
    ReminderRepository, SponsorRepository, TenantRepository,
};
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/public/campaigns/:slug
///
/// Campaign data for the anonymous pledge form.
pub async fn get_public_campaign(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (campaign, tenant) = load_public_campaign(&state, &slug).await?;
    Ok(Json(campaign.into_public_response(tenant.name)))
}

/// Invitation page data for the token-addressed response form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationPageResponse {
    pub campaign: PublicCampaignResponse,
    pub company: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub already_responded: bool,
}

/// GET /api/v1/public/invitations/:token
pub async fn get_invitation_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let invitation = invitation_repo
        .find_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    if invitation.is_expired() {
        return Err(ApiError::Conflict("This invitation has expired".to_string()));
    }

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let campaign = campaign_repo
        .find_by_id(invitation.campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let tenant = TenantRepository::new(state.pool.clone())
        .find_by_id(campaign.tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let sponsor = SponsorRepository::new(state.pool.clone())
        .find_by_id_and_tenant(invitation.sponsor_id, campaign.tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    let already_responded = invitation.has_responded();

    Ok(Json(InvitationPageResponse {
        campaign: campaign.into_public_response(tenant.name),
        company: sponsor.company,
        email: invitation.email,
        expires_at: invitation.expires_at,
        already_responded,
    }))
}

/// POST /api/v1/public/campaigns/:slug/pledges
///
/// Anonymous pledge; self-registers the sponsor idempotently by
/// (tenant, email).
pub async fn submit_public_pledge(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<SubmitPledgeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    request
        .validate_submission()
        .map_err(ApiError::Validation)?;

    // honeypot: report success, persist nothing
    if request.is_honeypot_triggered() {
        info!(slug = %slug, "Honeypot triggered on public pledge, dropping");
        return Ok((
            StatusCode::OK,
            Json(SubmitPledgeResponse {
                submitted: true,
                pledge_id: None,
            }),
        ));
    }

    let company = request
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("Company is required".to_string()))?;

    let (campaign, tenant) = load_public_campaign(&state, &slug).await?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());
    let sponsor = sponsor_repo
        .find_or_create(
            tenant.id,
            company,
            request.contact_name.as_deref(),
            &request.email,
            request.phone.as_deref(),
        )
        .await?;

    let pledge_repo = PledgeRepository::new(state.pool.clone());
    let pledge = pledge_repo
        .create(
            campaign.id,
            sponsor.id,
            None,
            request.status.as_str(),
            request.effective_amount(),
            request.comment.as_deref(),
            request.consent,
            PledgeSource::Public.as_str(),
        )
        .await?;

    info!(
        campaign_id = %campaign.id,
        sponsor_id = %sponsor.id,
        pledge_id = %pledge.id,
        status = %pledge.status,
        "Recorded public pledge"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitPledgeResponse {
            submitted: true,
            pledge_id: Some(pledge.id),
        }),
    ))
}

/// POST /api/v1/public/invitations/:token/pledges
///
/// Token-authorized pledge. One pledge per invitation: a pre-insert check
/// produces the friendly error, the unique index catches the race.
pub async fn submit_invitation_pledge(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<SubmitPledgeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    request
        .validate_submission()
        .map_err(ApiError::Validation)?;

    if request.is_honeypot_triggered() {
        info!("Honeypot triggered on invitation pledge, dropping");
        return Ok((
            StatusCode::OK,
            Json(SubmitPledgeResponse {
                submitted: true,
                pledge_id: None,
            }),
        ));
    }

    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let invitation = invitation_repo
        .find_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    if invitation.is_expired() {
        return Err(ApiError::Conflict("This invitation has expired".to_string()));
    }

    let pledge_repo = PledgeRepository::new(state.pool.clone());
    if invitation.has_responded() || pledge_repo.exists_for_invitation(invitation.id).await? {
        return Err(already_responded());
    }

    let pledge = pledge_repo
        .create(
            invitation.campaign_id,
            invitation.sponsor_id,
            Some(invitation.id),
            request.status.as_str(),
            request.effective_amount(),
            request.comment.as_deref(),
            request.consent,
            PledgeSource::Invite.as_str(),
        )
        .await
        .map_err(|e| match unique_violation(&e) {
            // the pre-check lost the race; same user-visible answer
            true => already_responded(),
            false => ApiError::from(e),
        })?;

    if !invitation_repo.mark_responded(invitation.id).await? {
        warn!(invitation_id = %invitation.id, "Invitation already marked responded");
    }

    let reminder_repo = ReminderRepository::new(state.pool.clone());
    if let Err(e) = reminder_repo.skip_pending_for_invitation(invitation.id).await {
        warn!(invitation_id = %invitation.id, error = %e, "Reminder skip failed");
    }

    info!(
        invitation_id = %invitation.id,
        campaign_id = %invitation.campaign_id,
        pledge_id = %pledge.id,
        status = %pledge.status,
        "Recorded invitation pledge"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitPledgeResponse {
            submitted: true,
            pledge_id: Some(pledge.id),
        }),
    ))
}

/// POST /api/v1/public/email-events
///
/// Email provider callback. The raw body is authenticated with an
/// HMAC-SHA256 signature in `X-Webhook-Signature`.
pub async fn record_email_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let secret = &state.config.security.webhook_secret;
    if secret.is_empty() {
        return Err(ApiError::Unauthorized(
            "Webhook signature verification is not configured".to_string(),
        ));
    }

    let signature = headers
        .get("x-webhook-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing webhook signature".to_string()))?;

    if !shared::crypto::verify_signature(&body, secret, signature) {
        return Err(ApiError::Unauthorized("Invalid webhook signature".to_string()));
    }

    let request: ProviderEventRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid event payload: {}", e)))?;

    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let invitation = invitation_repo
        .find_by_id(request.invitation_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    let campaign = CampaignRepository::new(state.pool.clone())
        .find_by_id(invitation.campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let event_repo = EmailEventRepository::new(state.pool.clone());
    event_repo
        .record(
            Some(invitation.id),
            campaign.id,
            Some(invitation.sponsor_id),
            campaign.tenant_id,
            request.event_type.as_str(),
            request.detail.as_ref(),
        )
        .await?;

    if let Some(status) = request.event_type.invitation_status() {
        invitation_repo
            .advance_status(invitation.id, status.as_str())
            .await?;
    }

    info!(
        invitation_id = %invitation.id,
        event_type = request.event_type.as_str(),
        "Recorded provider email event"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Loads a public campaign and its active tenant by slug.
async fn load_public_campaign(
    state: &AppState,
    slug: &str,
) -> Result<(CampaignEntity, TenantEntity), ApiError> {
    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let campaign = campaign_repo
        .find_public_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let tenant = TenantRepository::new(state.pool.clone())
        .find_by_id(campaign.tenant_id)
        .await?
        .filter(|t| t.is_active())
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    Ok((campaign, tenant))
}

fn already_responded() -> ApiError {
    ApiError::Conflict("You have already responded to this invitation".to_string())
}

fn unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_responded_is_conflict() {
        let error = already_responded();
        assert!(matches!(error, ApiError::Conflict(msg)
            if msg.contains("already responded")));
    }

    #[test]
    fn test_unique_violation_ignores_other_errors() {
        assert!(!unique_violation(&sqlx::Error::RowNotFound));
    }
}
