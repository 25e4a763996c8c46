//! Declarative authorization.
//!
//! One table maps route classes to the minimum role they require; a single
//! [`authorize`] function resolves it together with tenant ownership and
//! returns an allow/deny decision plus the reason.

use uuid::Uuid;

use crate::models::Role;

/// Classes of routes sharing one authorization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Creating tenants and listing all of them.
    TenantProvisioning,
    /// Reading and updating a single tenant's settings.
    TenantAdministration,
    /// Campaign CRUD within a tenant.
    CampaignManagement,
    /// Sponsor CRUD and import within a tenant.
    SponsorManagement,
    /// Email template CRUD within a tenant.
    TemplateManagement,
    /// Scheduling and inspecting invitation jobs.
    JobManagement,
    /// Listing invitations and pledges.
    CampaignReporting,
}

/// Minimum role required per route class.
///
/// Everything except tenant provisioning is club-admin territory; a
/// super-admin passes every gate.
const ROUTE_ROLES: &[(RouteClass, Role)] = &[
    (RouteClass::TenantProvisioning, Role::SuperAdmin),
    (RouteClass::TenantAdministration, Role::ClubAdmin),
    (RouteClass::CampaignManagement, Role::ClubAdmin),
    (RouteClass::SponsorManagement, Role::ClubAdmin),
    (RouteClass::TemplateManagement, Role::ClubAdmin),
    (RouteClass::JobManagement, Role::ClubAdmin),
    (RouteClass::CampaignReporting, Role::ClubAdmin),
];

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: &'static str,
}

impl AccessDecision {
    const fn allow() -> Self {
        Self {
            allowed: true,
            reason: "allowed",
        }
    }

    const fn deny(reason: &'static str) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Looks up the minimum role required for a route class.
pub fn required_role(route: RouteClass) -> Role {
    ROUTE_ROLES
        .iter()
        .find(|(r, _)| *r == route)
        .map(|(_, role)| *role)
        .expect("every route class has a table entry")
}

/// Resolves the route-role table for a caller.
///
/// Super-admins pass every gate regardless of tenant. Club admins pass
/// club-admin gates only for their own tenant: `target_tenant` is the
/// tenant the request operates on, `None` meaning the caller's own.
pub fn authorize(
    role: Role,
    user_tenant: Option<Uuid>,
    route: RouteClass,
    target_tenant: Option<Uuid>,
) -> AccessDecision {
    if role == Role::SuperAdmin {
        return AccessDecision::allow();
    }

    if required_role(route) == Role::SuperAdmin {
        return AccessDecision::deny("super_admin role required");
    }

    let Some(own_tenant) = user_tenant else {
        return AccessDecision::deny("no tenant attached to this account");
    };

    match target_tenant {
        Some(target) if target != own_tenant => AccessDecision::deny("tenant mismatch"),
        _ => AccessDecision::allow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_passes_everything() {
        for (route, _) in ROUTE_ROLES {
            let decision = authorize(Role::SuperAdmin, None, *route, Some(Uuid::new_v4()));
            assert!(decision.allowed, "super_admin denied on {:?}", route);
        }
    }

    #[test]
    fn test_club_admin_denied_provisioning() {
        let tenant = Uuid::new_v4();
        let decision = authorize(
            Role::ClubAdmin,
            Some(tenant),
            RouteClass::TenantProvisioning,
            None,
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason, "super_admin role required");
    }

    #[test]
    fn test_club_admin_allowed_own_tenant() {
        let tenant = Uuid::new_v4();
        let decision = authorize(
            Role::ClubAdmin,
            Some(tenant),
            RouteClass::CampaignManagement,
            Some(tenant),
        );
        assert!(decision.allowed);
    }

    #[test]
    fn test_club_admin_denied_other_tenant() {
        let decision = authorize(
            Role::ClubAdmin,
            Some(Uuid::new_v4()),
            RouteClass::CampaignManagement,
            Some(Uuid::new_v4()),
        );
        assert!(!decision.allowed);
        assert_eq!(decision.reason, "tenant mismatch");
    }

    #[test]
    fn test_club_admin_without_tenant_denied() {
        let decision = authorize(Role::ClubAdmin, None, RouteClass::SponsorManagement, None);
        assert!(!decision.allowed);
        assert_eq!(decision.reason, "no tenant attached to this account");
    }

    #[test]
    fn test_implicit_own_tenant_target() {
        let tenant = Uuid::new_v4();
        let decision = authorize(
            Role::ClubAdmin,
            Some(tenant),
            RouteClass::JobManagement,
            None,
        );
        assert!(decision.allowed);
    }

    #[test]
    fn test_required_role_table_complete() {
        assert_eq!(
            required_role(RouteClass::TenantProvisioning),
            Role::SuperAdmin
        );
        assert_eq!(required_role(RouteClass::CampaignReporting), Role::ClubAdmin);
    }
}
