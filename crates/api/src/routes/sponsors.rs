//! Sponsor routes: CRUD and bulk import.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateSponsorRequest, ImportSponsorsRequest, UpdateSponsorRequest};
use domain::services::authorization::RouteClass;
use persistence::repositories::SponsorRepository;
use serde::Serialize;
use shared::pagination::{PageQuery, Pagination};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthContext;

/// POST /api/v1/sponsors
pub async fn create_sponsor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateSponsorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::SponsorManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());

    // email uniqueness per tenant is by convention: pre-check only
    if sponsor_repo
        .find_by_email(tenant_id, &request.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "A sponsor with this email already exists".to_string(),
        ));
    }

    let entity = sponsor_repo
        .create(
            tenant_id,
            &request.company,
            request.contact_name.as_deref(),
            &request.email,
            request.phone.as_deref(),
            request.segment.as_deref(),
            request.notes.as_deref(),
        )
        .await?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        sponsor_id = %entity.id,
        "Created sponsor"
    );

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// Response for sponsor listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListSponsorsResponse {
    pub sponsors: Vec<domain::models::SponsorResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/sponsors
pub async fn list_sponsors(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::SponsorManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());
    let entities = sponsor_repo
        .list_by_tenant(tenant_id, query.per_page(), query.offset())
        .await?;
    let total = sponsor_repo.count_by_tenant(tenant_id).await?;

    Ok(Json(ListSponsorsResponse {
        sponsors: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// GET /api/v1/sponsors/:sponsor_id
pub async fn get_sponsor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(sponsor_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::SponsorManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());
    let entity = sponsor_repo
        .find_by_id_and_tenant(sponsor_id, tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sponsor not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// PATCH /api/v1/sponsors/:sponsor_id
pub async fn update_sponsor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(sponsor_id): Path<Uuid>,
    Json(request): Json<UpdateSponsorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::SponsorManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());
    let entity = sponsor_repo
        .update(
            sponsor_id,
            tenant_id,
            request.company.as_deref(),
            request.contact_name.as_deref(),
            request.email.as_deref(),
            request.phone.as_deref(),
            request.segment.as_deref(),
            request.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Sponsor not found".to_string()))?;

    info!(
        user_id = %auth.user_id,
        sponsor_id = %sponsor_id,
        "Updated sponsor"
    );

    Ok(Json(entity.into_response()))
}

/// DELETE /api/v1/sponsors/:sponsor_id
pub async fn delete_sponsor(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(sponsor_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::SponsorManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());
    let deleted = sponsor_repo.delete(sponsor_id, tenant_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Sponsor not found".to_string()));
    }

    info!(
        user_id = %auth.user_id,
        sponsor_id = %sponsor_id,
        "Deleted sponsor"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Outcome of a bulk import.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ImportSponsorsResponse {
    pub imported: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

/// POST /api/v1/sponsors/import
///
/// Bulk import; existing emails are skipped, per-row failures are
/// isolated and reported.
pub async fn import_sponsors(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<ImportSponsorsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::SponsorManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    let sponsor_repo = SponsorRepository::new(state.pool.clone());
    let mut imported = 0u32;
    let mut skipped = 0u32;
    let mut errors = Vec::new();

    for row in &request.sponsors {
        match sponsor_repo.find_by_email(tenant_id, &row.email).await {
            Ok(Some(_)) => {
                skipped += 1;
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(email = %row.email, error = %e, "Import lookup failed");
                errors.push(format!("{}: lookup failed", row.email));
                continue;
            }
        }

        match sponsor_repo
            .create(
                tenant_id,
                &row.company,
                row.contact_name.as_deref(),
                &row.email,
                row.phone.as_deref(),
                row.segment.as_deref(),
                row.notes.as_deref(),
            )
            .await
        {
            Ok(_) => imported += 1,
            Err(e) => {
                warn!(email = %row.email, error = %e, "Import insert failed");
                errors.push(format!("{}: insert failed", row.email));
            }
        }
    }

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        imported = imported,
        skipped = skipped,
        errors = errors.len(),
        "Imported sponsors"
    );

    Ok(Json(ImportSponsorsResponse {
        imported,
        skipped,
        errors,
    }))
}
