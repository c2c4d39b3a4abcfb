//! HTTP surface of the service.
//!
//! Everything that knows about requests and responses lives here; the
//! modules below translate between the wire format and the application
//! services, which never see HTTP types.
//!
//! - [`dto`] - request/response body types and their validation rules
//! - [`handlers`] - one async function per endpoint
//! - [`middleware`] - Bearer auth, rate limiting and request tracing
//! - [`routes`] - route groups composed by [`crate::routes::app_router`]

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
