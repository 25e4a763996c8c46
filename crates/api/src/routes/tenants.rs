//! Tenant administration routes.
//!
//! Provisioning and listing are super-admin only; reading and updating a
//! single tenant is self-service for its club admin.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateTenantRequest, Role, UpdateTenantRequest};
use domain::services::authorization::RouteClass;
use persistence::repositories::{TenantRepository, UserRepository};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageQuery, Pagination};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthContext;

/// POST /api/v1/tenants
///
/// Provision a new tenant (super-admin only).
pub async fn create_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TenantProvisioning, None)?;
    request.validate()?;

    let tenant_repo = TenantRepository::new(state.pool.clone());
    let entity = tenant_repo
        .create(
            &request.name,
            &request.contact_email,
            request.contact_phone.as_deref(),
            request.primary_color.as_deref(),
            request.secondary_color.as_deref(),
        )
        .await?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %entity.id,
        name = %entity.name,
        "Provisioned tenant"
    );

    Ok((StatusCode::CREATED, Json(entity.into_response())))
}

/// Response for tenant listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListTenantsResponse {
    pub tenants: Vec<domain::models::TenantResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/tenants
///
/// List all tenants (super-admin only).
pub async fn list_tenants(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TenantProvisioning, None)?;

    let tenant_repo = TenantRepository::new(state.pool.clone());
    let entities = tenant_repo.list(query.per_page(), query.offset()).await?;
    let total = tenant_repo.count().await?;

    Ok(Json(ListTenantsResponse {
        tenants: entities.into_iter().map(|e| e.into_response()).collect(),
        pagination: Pagination::new(query.page(), query.per_page(), total),
    }))
}

/// GET /api/v1/tenants/:tenant_id
///
/// Read one tenant's settings.
pub async fn get_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TenantAdministration, Some(tenant_id))?;

    let tenant_repo = TenantRepository::new(state.pool.clone());
    let entity = tenant_repo
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tenant not found".to_string()))?;

    Ok(Json(entity.into_response()))
}

/// PATCH /api/v1/tenants/:tenant_id
///
/// Update tenant settings (branding, signature, legal blocks, status).
pub async fn update_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<UpdateTenantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TenantAdministration, Some(tenant_id))?;
    request.validate()?;

    let tenant_repo = TenantRepository::new(state.pool.clone());
    let entity = tenant_repo
        .update(
            tenant_id,
            request.name.as_deref(),
            request.contact_email.as_deref(),
            request.contact_phone.as_deref(),
            request.primary_color.as_deref(),
            request.secondary_color.as_deref(),
            request.signature_html.as_deref(),
            request.legal_markdown.as_deref(),
            request.privacy_markdown.as_deref(),
            request.terms_markdown.as_deref(),
            request.status.map(|s| s.as_str()),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Tenant not found".to_string()))?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        "Updated tenant settings"
    );

    Ok(Json(entity.into_response()))
}

/// Request to attach a club admin to a tenant.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTenantAdminRequest {
    /// Identity provider subject of the admin user.
    pub user_id: Uuid,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// POST /api/v1/tenants/:tenant_id/admins
///
/// Attach a club admin account to a tenant (super-admin only). The user
/// authenticates with the external identity provider; this records its
/// role and tenant.
pub async fn create_tenant_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<CreateTenantAdminRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require(RouteClass::TenantProvisioning, None)?;
    request.validate()?;

    let tenant_repo = TenantRepository::new(state.pool.clone());
    if tenant_repo.find_by_id(tenant_id).await?.is_none() {
        return Err(ApiError::NotFound("Tenant not found".to_string()));
    }

    let user_repo = UserRepository::new(state.pool.clone());
    let user = user_repo
        .create(
            request.user_id,
            &request.email,
            Role::ClubAdmin.as_str(),
            Some(tenant_id),
        )
        .await?;

    info!(
        user_id = %auth.user_id,
        tenant_id = %tenant_id,
        admin_user_id = %user.id,
        "Attached club admin to tenant"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "user_id": user.id,
            "email": user.email,
            "role": user.role,
            "tenant_id": user.tenant_id,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tenant_admin_request_validation() {
        let valid = CreateTenantAdminRequest {
            user_id: Uuid::new_v4(),
            email: "admin@fc-exemple.fr".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateTenantAdminRequest {
            user_id: Uuid::new_v4(),
            email: "broken".to_string(),
        };
        assert!(invalid.validate().is_err());
    }
}
