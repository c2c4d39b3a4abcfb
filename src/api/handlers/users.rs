//! Handlers for account lookup and removal.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::auth::StatusResponse;
use crate::api::dto::user::UserResponse;
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the public profile of a user.
///
/// # Endpoint
///
/// `GET /api/user/{id}`
///
/// No authentication required; the response never contains credentials.
///
/// # Response Codes
///
/// - **200 OK**: returns id, email and username
/// - **404 Not Found**: no user with this id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_by_id(id).await?;

    Ok(Json(user.into()))
}

/// Deletes the authenticated user's own account.
///
/// Short URLs owned by the account are removed with it.
///
/// # Endpoint
///
/// `DELETE /api/user/{id}`
///
/// # Response Codes
///
/// - **200 OK**: account removed
/// - **401 Unauthorized**: missing or invalid access token
/// - **403 Forbidden**: `{id}` is not the authenticated user
/// - **404 Not Found**: account already gone
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(AuthUser(requester_id)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    state.user_service.delete_account(requester_id, id).await?;

    Ok(Json(StatusResponse { status: "ok" }))
}
