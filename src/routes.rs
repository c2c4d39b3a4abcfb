//! Top-level router configuration combining all route groups.
//!
//! # Route Structure
//!
//! - `GET /{alias}`   - Short URL redirect (public)
//! - `GET /health`    - Health check: DB, session store (public)
//! - `/api/auth/*`    - Account and session lifecycle (public, cookie-based refresh)
//! - `/api/url/*`     - Short URL management (Bearer token required)
//! - `/api/user/*`    - Account lookup (public) and removal (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer access token on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy));

    let api_public = Router::new()
        .merge(api::routes::auth_routes())
        .merge(api::routes::public_routes())
        .layer(rate_limit::layer(behind_proxy));

    // `/user/{id}` lives in both groups with disjoint methods; the method
    // routers merge without a conflict.
    let api_router = Router::new().merge(api_protected).merge(api_public);

    let router = Router::new()
        .route("/{alias}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
