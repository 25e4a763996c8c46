//! Scheduled job routes: scheduling invitation batches and inspecting
//! their outcomes.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use domain::models::invitation::clamp_expiry_days;
use domain::models::{
    InvitationJobPayload, JobType, ListJobsQuery, ScheduleInvitationJobRequest,
};
use domain::services::authorization::RouteClass;
use persistence::repositories::{CampaignRepository, ScheduledJobRepository};
use serde::Serialize;
use shared::pagination::Pagination;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthContext;

/// POST /api/v1/jobs/invitations
///
/// Queue an invitation batch. The job runner picks it up once
/// `scheduled_at` is due.
pub async fn schedule_invitation_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<ScheduleInvitationJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::JobManagement, None)?;
    request.validate()?;
    request
        .validate_reminder_days()
        .map_err(ApiError::Validation)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    if campaign_repo
        .find_by_id_and_tenant(request.campaign_id, tenant_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    let payload = InvitationJobPayload {
        campaign_id: request.campaign_id,
        sponsor_ids: request.sponsor_ids.clone(),
        expiry_days: clamp_expiry_days(request.expiry_days),
        reminder_days: request.reminder_days.clone().unwrap_or_default(),
    };
    let payload_value = serde_json::to_value(&payload)
        .map_err(|e| ApiError::Internal(format!("payload serialization failed: {}", e)))?;

    let scheduled_at = request.scheduled_at.unwrap_or_else(Utc::now);

    let job_repo = ScheduledJobRepository::new(state.pool.clone());
    let entity = job_repo
        .create(
            tenant_id,
            request.campaign_id,
            JobType::CampaignInvitations.as_str(),
            &payload_value,
            scheduled_at,
        )
        .await?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        job_id = %entity.id,
        campaign_id = %request.campaign_id,
        sponsors = payload.sponsor_ids.len(),
        scheduled_at = %scheduled_at,
        "Scheduled invitation job"
    );

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// Response for job listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListJobsResponse {
    pub jobs: Vec<domain::models::JobResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListJobsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::JobManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let status = query.status_filter().map(|s| s.as_str());
    let job_repo = ScheduledJobRepository::new(state.pool.clone());
    let entities = job_repo
        .list_by_tenant(tenant_id, status, query.per_page(), query.offset())
        .await?;
    let total = job_repo.count_by_tenant(tenant_id, status).await?;

    Ok(Json(ListJobsResponse {
        jobs: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// GET /api/v1/jobs/:job_id
pub async fn get_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::JobManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let job_repo = ScheduledJobRepository::new(state.pool.clone());
    let entity = job_repo
        .find_by_id_and_tenant(job_id, tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    Ok(Json(entity.into_response()))
}
