use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, public_rate_limit_middleware, require_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{campaigns, health, jobs, public_intake, sponsors, templates, tenants};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub token_verifier: shared::jwt::TokenVerifier,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let rate_limiter = if config.security.public_rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.public_rate_limit_per_minute,
        )))
    } else {
        None
    };

    let token_verifier = shared::jwt::TokenVerifier::with_leeway(
        &config.auth.token_secret,
        config.auth.leeway_secs,
    );

    let state = AppState {
        pool,
        config: config.clone(),
        token_verifier,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (the public pledge pages are anonymous)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authenticated routes (bearer token -> role/tenant lookup)
    let protected_routes = Router::new()
        // Tenants
        .route(
            "/api/v1/tenants",
            post(tenants::create_tenant).get(tenants::list_tenants),
        )
        .route(
            "/api/v1/tenants/:tenant_id",
            get(tenants::get_tenant).patch(tenants::update_tenant),
        )
        .route(
            "/api/v1/tenants/:tenant_id/admins",
            post(tenants::create_tenant_admin),
        )
        // Campaigns
        .route(
            "/api/v1/campaigns",
            post(campaigns::create_campaign).get(campaigns::list_campaigns),
        )
        .route(
            "/api/v1/campaigns/:campaign_id",
            get(campaigns::get_campaign)
                .patch(campaigns::update_campaign)
                .delete(campaigns::delete_campaign),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/invitations",
            get(campaigns::list_invitations),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/pledges",
            get(campaigns::list_pledges),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/email-events",
            get(campaigns::list_email_events),
        )
        // Sponsors
        .route(
            "/api/v1/sponsors",
            post(sponsors::create_sponsor).get(sponsors::list_sponsors),
        )
        .route("/api/v1/sponsors/import", post(sponsors::import_sponsors))
        .route(
            "/api/v1/sponsors/:sponsor_id",
            get(sponsors::get_sponsor)
                .patch(sponsors::update_sponsor)
                .delete(sponsors::delete_sponsor),
        )
        // Email templates
        .route(
            "/api/v1/templates",
            post(templates::create_template).get(templates::list_templates),
        )
        .route(
            "/api/v1/templates/:template_id",
            get(templates::get_template).patch(templates::update_template),
        )
        // Jobs
        .route("/api/v1/jobs/invitations", post(jobs::schedule_invitation_job))
        .route("/api/v1/jobs", get(jobs::list_jobs))
        .route("/api/v1/jobs/:job_id", get(jobs::get_job))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes: pledge pages, intake, provider callback
    let public_routes = Router::new()
        .route(
            "/api/v1/public/campaigns/:slug",
            get(public_intake::get_public_campaign),
        )
        .route(
            "/api/v1/public/campaigns/:slug/pledges",
            post(public_intake::submit_public_pledge),
        )
        .route(
            "/api/v1/public/invitations/:token",
            get(public_intake::get_invitation_page),
        )
        .route(
            "/api/v1/public/invitations/:token/pledges",
            post(public_intake::submit_invitation_pledge),
        )
        .route(
            "/api/v1/public/email-events",
            post(public_intake::record_email_event),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            public_rate_limit_middleware,
        ));

    // Operational routes (no authentication)
    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(ops_routes)
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
