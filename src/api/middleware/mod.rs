//! Middleware applied around the route groups.
//!
//! [`auth`] guards the protected routes, [`rate_limit`] throttles the API
//! per client IP, and [`tracing`] gives every request a logging span.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
