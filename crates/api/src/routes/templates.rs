//! Email template administration routes.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateTemplateRequest, UpdateTemplateRequest};
use domain::services::authorization::RouteClass;
use persistence::repositories::EmailTemplateRepository;
use serde::Serialize;
use shared::pagination::{PageQuery, Pagination};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthContext;

/// POST /api/v1/templates
pub async fn create_template(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TemplateManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    let template_repo = EmailTemplateRepository::new(state.pool.clone());
    let entity = template_repo
        .create(
            Some(tenant_id),
            request.template_type.as_str(),
            &request.subject,
            &request.html_body,
            &request.text_body,
            request.is_active,
        )
        .await?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        template_id = %entity.id,
        template_type = %entity.template_type,
        "Created email template"
    );

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// Response for template listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListTemplatesResponse {
    pub templates: Vec<domain::models::TemplateResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/templates
pub async fn list_templates(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TemplateManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let template_repo = EmailTemplateRepository::new(state.pool.clone());
    let entities = template_repo
        .list_by_tenant(tenant_id, query.per_page(), query.offset())
        .await?;
    let total = template_repo.count_by_tenant(tenant_id).await?;

    Ok(Json(ListTemplatesResponse {
        templates: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// GET /api/v1/templates/:template_id
pub async fn get_template(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(template_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TemplateManagement, None)?;
    let tenant_id = auth.own_tenant()?;

    let template_repo = EmailTemplateRepository::new(state.pool.clone());
    let entity = template_repo
        .find_by_id_and_tenant(template_id, tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// PATCH /api/v1/templates/:template_id
pub async fn update_template(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TemplateManagement, None)?;
    request.validate()?;
    let tenant_id = auth.own_tenant()?;

    let template_repo = EmailTemplateRepository::new(state.pool.clone());
    let entity = template_repo
        .update(
            template_id,
            tenant_id,
            request.subject.as_deref(),
            request.html_body.as_deref(),
            request.text_body.as_deref(),
            request.is_active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    info!(
        user_id = %auth.user_id,
        template_id = %template_id,
        "Updated email template"
    );

    Ok(Json(entity.into_response()))
}
