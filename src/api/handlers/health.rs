//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Probes the database and the session store and reports per-component
/// status.
///
/// # Endpoint
///
/// `GET /health`
///
/// The whole report is returned either way: 200 with `status: "healthy"`
/// when both probes pass, 503 with `status: "degraded"` and the failing
/// component marked `"error"` otherwise. Load balancers key off the status
/// code, humans read the body.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "session_store": { "status": "ok", "message": "Session store reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let session_check = check_session_store(&state).await;

    let all_healthy = db_check.status == "ok" && session_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            session_store: session_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Runs a trivial query to prove the pool can hand out a live connection.
async fn check_database(state: &AppState) -> CheckStatus {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
    }
}

/// Asks the refresh session backend whether it can serve lookups.
async fn check_session_store(state: &AppState) -> CheckStatus {
    if state.session_store.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Session store reachable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Session store unreachable".to_string()),
        }
    }
}
