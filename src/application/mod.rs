//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration and session lifecycle
//! - [`services::url_service::UrlService`] - Short URL management
//! - [`services::redirect_service::RedirectService`] - Alias resolution and counting
//! - [`services::user_service::UserService`] - Profiles and account removal
//! - [`services::token_manager::TokenManager`] - Access/refresh token issuance

pub mod services;
