//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower::util::Either;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Governor layer keyed by the socket peer address.
type PeerLayer = GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Governor layer keyed by `X-Forwarded-For` / `X-Real-IP` headers.
type SmartLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for public endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP. With `behind_proxy` the IP comes
/// from `X-Forwarded-For` / `X-Real-IP` headers; otherwise from the socket
/// peer address. Only enable `behind_proxy` when a trusted reverse proxy
/// sets those headers.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/auth/signup", post(signup_handler))
///     .layer(rate_limit::layer(false));
/// ```
pub fn layer(behind_proxy: bool) -> Either<SmartLayer, PeerLayer> {
    if behind_proxy {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(2)
                .burst_size(100)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .unwrap(),
        );

        Either::Left(GovernorLayer::new(governor_conf))
    } else {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(2)
                .burst_size(100)
                .finish()
                .unwrap(),
        );

        Either::Right(GovernorLayer::new(governor_conf))
    }
}

/// Creates a stricter rate limiter for authenticated endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Used for URL management and account removal.
///
/// # Example
///
/// ```rust,ignore
/// let secure_routes = Router::new()
///     .route("/api/url", post(create_url_handler))
///     .layer(rate_limit::secure_layer(false));
/// ```
pub fn secure_layer(behind_proxy: bool) -> Either<SmartLayer, PeerLayer> {
    if behind_proxy {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(1)
                .burst_size(10)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .unwrap(),
        );

        Either::Left(GovernorLayer::new(governor_conf))
    } else {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(1)
                .burst_size(10)
                .finish()
                .unwrap(),
        );

        Either::Right(GovernorLayer::new(governor_conf))
    }
}
