//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Every request gets an `INFO` span carrying the method, path and HTTP
/// version; the response is logged in that span with its status code and
/// latency. Server errors and classify failures are additionally logged at
/// `WARN`, so a `RUST_LOG=warn` deployment still surfaces every 5xx.
///
/// Latency is reported in milliseconds. The redirect path is the hot path
/// of this service; a slow response there points at the database.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/rust-docs version=HTTP/1.1}: finished processing request latency=2 ms status=308
/// INFO request{method=POST uri=/api/url version=HTTP/1.1}: finished processing request latency=11 ms status=201
/// ```
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
