//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Identity of the authenticated caller, inserted into request extensions
/// once the access token checks out.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

/// Verifies the `Authorization: Bearer <access token>` header and stores
/// the caller's identity for the handlers downstream.
///
/// The token is a JWT checked purely locally against the signing secret,
/// so this layer never touches the database. On success an [`AuthUser`]
/// carrying the subject id lands in the request extensions; handlers pull
/// it out with `Extension(AuthUser(user_id))`.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the header is missing or malformed,
/// the signature does not verify, or the token is expired. The response
/// carries `WWW-Authenticate: Bearer` per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/api/url", post(create_url_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let claims = st.token_manager.verify_access(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AuthUser(claims.sub));

    Ok(next.run(req).await)
}
