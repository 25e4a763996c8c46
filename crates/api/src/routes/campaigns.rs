//! Campaign routes: CRUD plus reporting subresources (invitations,
//! pledges, email events).

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::campaign::slug_from_title;
use domain::models::{
    CreateCampaignRequest, ListInvitationsQuery, UpdateCampaignRequest,
};
use domain::services::authorization::RouteClass;
use persistence::repositories::{
    CampaignRepository, EmailEventRepository, InvitationRepository, PledgeRepository,
};
use serde::Serialize;
use shared::pagination::{PageQuery, Pagination};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthContext;

/// POST /api/v1/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    // public campaigns need a slug; derive one from the title when absent
    let slug = match (&request.slug, request.is_public) {
        (Some(slug), _) => Some(slug.clone()),
        (None, true) => {
            let derived = slug_from_title(&request.title);
            if derived.is_empty() {
                return Err(ApiError::Validation(
                    "Cannot derive a slug from this title; provide one".to_string(),
                ));
            }
            Some(derived)
        }
        (None, false) => None,
    };

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let entity = campaign_repo
        .create(
            tenant_id,
            &request.title,
            request.description.as_deref(),
            request.location.as_deref(),
            request.screen_type.as_deref(),
            request.footfall_estimate,
            request.price_hint,
            request.deadline,
            request.is_public,
            slug.as_deref(),
        )
        .await?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        campaign_id = %entity.id,
        "Created campaign"
    );

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// Response for campaign listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListCampaignsResponse {
    pub campaigns: Vec<domain::models::CampaignResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let entities = campaign_repo
        .list_by_tenant(tenant_id, query.per_page(), query.offset())
        .await?;
    let total = campaign_repo.count_by_tenant(tenant_id).await?;

    Ok(Json(ListCampaignsResponse {
        campaigns: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// GET /api/v1/campaigns/:campaign_id
pub async fn get_campaign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(campaign_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let entity = campaign_repo
        .find_by_id_and_tenant(campaign_id, tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// PATCH /api/v1/campaigns/:campaign_id
pub async fn update_campaign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let entity = campaign_repo
        .update(
            campaign_id,
            tenant_id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.location.as_deref(),
            request.screen_type.as_deref(),
            request.footfall_estimate,
            request.price_hint,
            request.deadline,
            request.is_public,
            request.slug.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    info!(
        user_id = %auth.user_id,
        campaign_id = %campaign_id,
        "Updated campaign"
    );

    Ok(Json(entity.into_response()))
}

/// DELETE /api/v1/campaigns/:campaign_id
pub async fn delete_campaign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(campaign_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    let deleted = campaign_repo.delete(campaign_id, tenant_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    info!(
        user_id = %auth.user_id,
        campaign_id = %campaign_id,
        "Deleted campaign"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Response for invitation listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsResponse {
    pub invitations: Vec<domain::models::InvitationResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/campaigns/:campaign_id/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(campaign_id): Path<Uuid>,
    Query(query): Query<ListInvitationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignReporting, None)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    if campaign_repo
        .find_by_id_and_tenant(campaign_id, tenant_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    let status = query.status_filter().map(|s| s.as_str());
    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let entities = invitation_repo
        .list_by_campaign(campaign_id, status, query.per_page(), query.offset())
        .await?;
    let total = invitation_repo.count_by_campaign(campaign_id, status).await?;

    Ok(Json(ListInvitationsResponse {
        invitations: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// Response for pledge listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListPledgesResponse {
    pub pledges: Vec<domain::models::PledgeResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/campaigns/:campaign_id/pledges
pub async fn list_pledges(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(campaign_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignReporting, None)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    if campaign_repo
        .find_by_id_and_tenant(campaign_id, tenant_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    let pledge_repo = PledgeRepository::new(state.pool.clone());
    let entities = pledge_repo
        .list_by_campaign(campaign_id, query.per_page(), query.offset())
        .await?;
    let total = pledge_repo.count_by_campaign(campaign_id).await?;

    Ok(Json(ListPledgesResponse {
        pledges: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// Response for email event listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEmailEventsResponse {
    pub events: Vec<domain::models::EmailEventResponse>,
}

/// GET /api/v1/campaigns/:campaign_id/email-events
pub async fn list_email_events(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(campaign_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::CampaignReporting, None)?;
    let tenant_id = auth.own_tenant()?;

    let campaign_repo = CampaignRepository::new(state.pool.clone());
    if campaign_repo
        .find_by_id_and_tenant(campaign_id, tenant_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    let event_repo = EmailEventRepository::new(state.pool.clone());
    let entities = event_repo
        .list_by_campaign(campaign_id, query.per_page(), query.offset())
        .await?;

    Ok(Json(ListEmailEventsResponse {
        events: entities.into_iter().map(|e| e.into_response()).collect(),
    }))
}
