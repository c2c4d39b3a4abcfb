//! Handlers for short URL management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::auth::StatusResponse;
use crate::api::dto::url::{CreateUrlRequest, ShortUrlResponse, UpdateUrlRequest};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/url`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/very/long/path",
///   "alias": "docs"
/// }
/// ```
///
/// `alias` is optional; when omitted or empty a random alias is generated.
///
/// # Response Codes
///
/// - **201 Created**: returns the stored mapping
/// - **400 Bad Request**: invalid long URL or custom alias
/// - **401 Unauthorized**: missing or invalid access token
/// - **409 Conflict**: alias already taken
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    payload.validate()?;

    let url = state
        .url_service
        .create(user_id, payload.url, payload.alias)
        .await?;

    Ok((StatusCode::CREATED, Json(url.into())))
}

/// Updates the long URL and/or alias of an owned mapping.
///
/// # Endpoint
///
/// `PATCH /api/url/{id}`
///
/// Omitted or empty fields are left untouched.
///
/// # Response Codes
///
/// - **200 OK**: returns the updated mapping
/// - **400 Bad Request**: invalid replacement URL or alias
/// - **401 Unauthorized**: missing or invalid access token
/// - **403 Forbidden**: mapping belongs to another user
/// - **404 Not Found**: no mapping with this id
/// - **409 Conflict**: new alias already taken
pub async fn update_url_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let url = state
        .url_service
        .update(user_id, id, payload.into())
        .await?;

    Ok(Json(url.into()))
}

/// Deletes an owned mapping.
///
/// # Endpoint
///
/// `DELETE /api/url/{id}`
///
/// # Response Codes
///
/// - **200 OK**: mapping removed
/// - **401 Unauthorized**: missing or invalid access token
/// - **403 Forbidden**: mapping belongs to another user
/// - **404 Not Found**: no mapping with this id
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, AppError> {
    state.url_service.delete(user_id, id).await?;

    Ok(Json(StatusResponse { status: "ok" }))
}

/// Lists the authenticated user's mappings, newest first.
///
/// # Endpoint
///
/// `GET /api/user/{id}/urls`
///
/// # Response Codes
///
/// - **200 OK**: returns the list, possibly empty
/// - **401 Unauthorized**: missing or invalid access token
/// - **403 Forbidden**: `{id}` is not the authenticated user
pub async fn list_user_urls_handler(
    State(state): State<AppState>,
    Extension(AuthUser(requester_id)): Extension<AuthUser>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ShortUrlResponse>>, AppError> {
    let urls = state
        .url_service
        .list_for_user(requester_id, user_id)
        .await?;

    Ok(Json(urls.into_iter().map(Into::into).collect()))
}
