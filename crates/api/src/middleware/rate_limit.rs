//! Rate limiting middleware for the public intake routes.
//!
//! The pledge form's 3-second client-side gap is trivially bypassable, so
//! the server keeps its own per-client budget on the anonymous endpoints.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Type alias for the per-client rate limiter.
type ClientRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across requests, keyed by client address.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<String, Arc<ClientRateLimiter>>>,
    limit_per_minute: u32,
}

impl RateLimiterState {
    /// Creates a new rate limiter state with the specified limit per minute.
    pub fn new(limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            limit_per_minute,
        }
    }

    fn get_or_create_limiter(&self, client: &str) -> Arc<ClientRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(client) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();
        if let Some(limiter) = limiters.get(client) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.limit_per_minute).unwrap_or(NonZeroU32::new(30).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(client.to_string(), limiter.clone());
        limiter
    }

    /// Checks whether a request from the given client is allowed.
    pub fn check(&self, client: &str) -> bool {
        self.get_or_create_limiter(client).check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("limit_per_minute", &self.limit_per_minute)
            .field("active_clients", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Middleware that applies per-client rate limiting on public routes.
///
/// The client key is the first `X-Forwarded-For` hop when present (the
/// service sits behind a proxy in production), else "unknown".
pub async fn public_rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = &state.rate_limiter else {
        return next.run(req).await;
    };

    let client = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !limiter.check(&client) {
        tracing::warn!(client = %client, "Public intake rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_within_limit() {
        let state = RateLimiterState::new(10);
        for _ in 0..10 {
            assert!(state.check("1.2.3.4"));
        }
    }

    #[test]
    fn test_blocks_over_limit() {
        let state = RateLimiterState::new(3);
        assert!(state.check("1.2.3.4"));
        assert!(state.check("1.2.3.4"));
        assert!(state.check("1.2.3.4"));
        assert!(!state.check("1.2.3.4"));
    }

    #[test]
    fn test_clients_tracked_separately() {
        let state = RateLimiterState::new(1);
        assert!(state.check("1.2.3.4"));
        assert!(!state.check("1.2.3.4"));
        assert!(state.check("5.6.7.8"));
    }

    #[test]
    fn test_debug_reports_client_count() {
        let state = RateLimiterState::new(5);
        state.check("a");
        state.check("b");
        let debug = format!("{:?}", state);
        assert!(debug.contains("active_clients: 2"));
    }
}
