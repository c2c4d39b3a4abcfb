//! Handlers for signup, login, logout, and token refresh.
//!
//! The refresh token travels only in an `HttpOnly` cookie scoped to
//! `/api/auth`; the access token travels in the response body and later in
//! `Authorization: Bearer` headers.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, SignupRequest, StatusResponse, TokenPairResponse};
use crate::api::dto::user::UserResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the refresh token.
const REFRESH_COOKIE: &str = "refresh_token";

/// Path scope of the refresh cookie.
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Creates a new account.
///
/// # Endpoint
///
/// `POST /api/auth/signup`
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "username": "alice", "password": "secret123" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: account created, body is the public profile
/// - **400 Bad Request**: validation failed
/// - **409 Conflict**: email or username already taken
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(payload.email, payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Opens a session for an existing account.
///
/// # Endpoint
///
/// `POST /api/auth/session`
///
/// # Response
///
/// Body carries the token pair; the refresh token is additionally set as an
/// `HttpOnly` cookie so browser clients never expose it to scripts.
///
/// # Response Codes
///
/// - **200 OK**: session opened
/// - **400 Bad Request**: validation failed
/// - **401 Unauthorized**: credentials do not match any account
pub async fn login_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let pair = state
        .auth_service
        .login(
            &payload.email,
            &payload.password,
            addr.ip().to_string(),
            user_agent(&headers),
        )
        .await?;

    let cookie = build_refresh_cookie(&pair.refresh_token, state.refresh_ttl_secs);
    let mut response = Json(TokenPairResponse::from(pair)).into_response();
    set_cookie(&mut response, &cookie);

    Ok(response)
}

/// Closes the current session.
///
/// # Endpoint
///
/// `DELETE /api/auth/session`
///
/// The cookie is cleared whether or not the session is still live; only the
/// status code differs.
///
/// # Response Codes
///
/// - **200 OK**: session closed
/// - **400 Bad Request**: refresh cookie is missing
/// - **404 Not Found**: the session was already closed
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = read_refresh_cookie(&headers)
        .ok_or_else(|| AppError::bad_request("Refresh cookie is missing", json!({})))?;

    let result = state.auth_service.logout(&token).await;

    let mut response = match result {
        Ok(()) => Json(StatusResponse { status: "ok" }).into_response(),
        Err(e) => e.into_response(),
    };
    set_cookie(&mut response, &clear_refresh_cookie());

    Ok(response)
}

/// Exchanges a refresh token for a fresh token pair.
///
/// # Endpoint
///
/// `POST /api/auth/refresh`
///
/// The presented token is consumed; the rotated replacement arrives in the
/// body and the cookie.
///
/// # Response Codes
///
/// - **200 OK**: pair rotated
/// - **403 Forbidden**: refresh cookie is missing
/// - **401 Unauthorized**: token unknown, expired, or already rotated
pub async fn refresh_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = read_refresh_cookie(&headers)
        .ok_or_else(|| AppError::forbidden("Refresh cookie is missing", json!({})))?;

    let pair = state
        .auth_service
        .refresh(&token, addr.ip().to_string(), user_agent(&headers))
        .await?;

    let cookie = build_refresh_cookie(&pair.refresh_token, state.refresh_ttl_secs);
    let mut response = Json(TokenPairResponse::from(pair)).into_response();
    set_cookie(&mut response, &cookie);

    Ok(response)
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Builds the `Set-Cookie` value binding a refresh token.
fn build_refresh_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{REFRESH_COOKIE}={token}; Max-Age={max_age_secs}; Path={REFRESH_COOKIE_PATH}; HttpOnly; SameSite=Lax"
    )
}

/// Builds the `Set-Cookie` value that erases the refresh cookie.
fn clear_refresh_cookie() -> String {
    format!("{REFRESH_COOKIE}=; Max-Age=0; Path={REFRESH_COOKIE_PATH}; HttpOnly; SameSite=Lax")
}

/// Extracts the refresh token from the `Cookie` header, if present.
fn read_refresh_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(name), Some(value)) if name == REFRESH_COOKIE => Some(value.to_string()),
            _ => None,
        }
    })
}

fn set_cookie(response: &mut Response, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_refresh_cookie_attributes() {
        let cookie = build_refresh_cookie("abc123", 604_800);

        assert!(cookie.starts_with("refresh_token=abc123;"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("Path=/api/auth"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_refresh_cookie();

        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/api/auth"));
    }

    #[test]
    fn test_read_refresh_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("a=1; refresh_token=tok-42; b=2"),
        );

        assert_eq!(read_refresh_cookie(&headers).as_deref(), Some("tok-42"));
    }

    #[test]
    fn test_read_refresh_cookie_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("a=1; b=2"));

        assert!(read_refresh_cookie(&headers).is_none());
        assert!(read_refresh_cookie(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_read_refresh_cookie_value_with_equals() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("refresh_token=a=b=c"),
        );

        assert_eq!(read_refresh_cookie(&headers).as_deref(), Some("a=b=c"));
    }
}
