//! API route configuration.
//!
//! Routes are grouped by the protection they need: [`protected_routes`]
//! require Bearer token authentication via [`crate::api::middleware::auth`],
//! the rest are reachable without credentials.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, delete_user_handler, get_user_handler,
    list_user_urls_handler, login_handler, logout_handler, refresh_handler, signup_handler,
    update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Account and session lifecycle routes, no Bearer token required.
///
/// # Endpoints
///
/// - `POST   /auth/signup`   - Register a new account
/// - `POST   /auth/session`  - Log in, issue a token pair and refresh cookie
/// - `DELETE /auth/session`  - Log out, close the refresh session
/// - `POST   /auth/refresh`  - Rotate the token pair using the refresh cookie
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/session", post(login_handler).delete(logout_handler))
        .route("/auth/refresh", post(refresh_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /url`              - Create a short URL
/// - `PATCH  /url/{id}`         - Update an owned short URL
/// - `DELETE /url/{id}`         - Delete an owned short URL
/// - `DELETE /user/{id}`        - Delete own account
/// - `GET    /user/{id}/urls`   - List own short URLs
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(create_url_handler))
        .route(
            "/url/{id}",
            patch(update_url_handler).delete(delete_url_handler),
        )
        .route("/user/{id}", delete(delete_user_handler))
        .route("/user/{id}/urls", get(list_user_urls_handler))
}

/// Public lookup routes.
///
/// # Endpoints
///
/// - `GET /user/{id}` - Public profile of a user
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/user/{id}", get(get_user_handler))
}
