//! Business logic services for the application layer.

pub mod auth_service;
pub mod redirect_service;
pub mod token_manager;
pub mod url_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use redirect_service::RedirectService;
pub use token_manager::TokenManager;
pub use url_service::UrlService;
pub use user_service::UserService;
