//! DTOs for the health check endpoint.

use serde::Serialize;

/// Top-level health report.
///
/// `status` is `"healthy"` only when every component check passed;
/// otherwise `"degraded"`, served with a 503.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// One entry per probed component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub session_store: CheckStatus,
}

/// Outcome of a single component probe, `"ok"` or `"error"`.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
