//! Bearer-token authentication middleware.
//!
//! Verifies the identity provider's access token, resolves the caller's
//! role and tenant from the users table, and stores an [`AuthContext`] in
//! request extensions for downstream handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::Role;
use domain::services::authorization::{authorize, RouteClass};
use persistence::repositories::UserRepository;
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated caller: verified user id plus role/tenant resolution.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
    pub tenant_id: Option<Uuid>,
}

impl AuthContext {
    /// Resolves the route-role table for this caller.
    ///
    /// `target_tenant` is the tenant the request operates on; `None`
    /// means the caller's own.
    pub fn require(
        &self,
        route: RouteClass,
        target_tenant: Option<Uuid>,
    ) -> Result<(), ApiError> {
        let decision = authorize(self.role, self.tenant_id, route, target_tenant);
        if decision.allowed {
            Ok(())
        } else {
            Err(ApiError::Forbidden(decision.reason.to_string()))
        }
    }

    /// The tenant this caller's tenant-scoped requests operate on.
    pub fn own_tenant(&self) -> Result<Uuid, ApiError> {
        self.tenant_id
            .ok_or_else(|| ApiError::Forbidden("no tenant attached to this account".to_string()))
    }
}

/// Middleware that requires a valid bearer token and a known user.
///
/// The token proves identity; the role and tenant come from the users
/// table, never from token claims.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let user_id = match state.token_verifier.verify(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!("Token verification failed: {}", e);
            return unauthorized_response("Invalid or expired token");
        }
    };

    let user_repo = UserRepository::new(state.pool.clone());
    let user = match user_repo.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!(user_id = %user_id, "Token subject unknown to this backend");
            return unauthorized_response("Unknown user");
        }
        Err(e) => {
            tracing::error!("Database error resolving user: {}", e);
            return internal_error_response("Authentication service unavailable");
        }
    };

    let Some(role) = user.role() else {
        tracing::warn!(user_id = %user_id, role = %user.role, "User has unrecognized role");
        return unauthorized_response("Unknown user");
    };

    req.extensions_mut().insert(AuthContext {
        user_id,
        role,
        tenant_id: user.tenant_id,
    });

    next.run(req).await
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "unauthorized", "message": message})),
    )
        .into_response()
}

fn internal_error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "internal_error", "message": message})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club_admin(tenant_id: Uuid) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            role: Role::ClubAdmin,
            tenant_id: Some(tenant_id),
        }
    }

    #[test]
    fn test_require_allows_own_tenant() {
        let tenant = Uuid::new_v4();
        let auth = club_admin(tenant);
        assert!(auth
            .require(RouteClass::CampaignManagement, Some(tenant))
            .is_ok());
    }

    #[test]
    fn test_require_rejects_other_tenant() {
        let auth = club_admin(Uuid::new_v4());
        let result = auth.require(RouteClass::CampaignManagement, Some(Uuid::new_v4()));
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_require_rejects_provisioning_for_club_admin() {
        let auth = club_admin(Uuid::new_v4());
        let result = auth.require(RouteClass::TenantProvisioning, None);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_super_admin_passes_provisioning() {
        let auth = AuthContext {
            user_id: Uuid::new_v4(),
            role: Role::SuperAdmin,
            tenant_id: None,
        };
        assert!(auth.require(RouteClass::TenantProvisioning, None).is_ok());
    }

    #[test]
    fn test_own_tenant_requires_attachment() {
        let auth = AuthContext {
            user_id: Uuid::new_v4(),
            role: Role::SuperAdmin,
            tenant_id: None,
        };
        assert!(auth.own_tenant().is_err());

        let tenant = Uuid::new_v4();
        assert_eq!(club_admin(tenant).own_tenant().unwrap(), tenant);
    }
}
