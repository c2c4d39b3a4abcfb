//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its long URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Resolve the alias against the store
/// 2. Count the redirect
/// 3. Return 308 Permanent Redirect
///
/// A failed counter update is logged and never blocks the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.redirect_service.resolve_and_count(&alias).await?;

    Ok(Redirect::permanent(&long_url))
}
