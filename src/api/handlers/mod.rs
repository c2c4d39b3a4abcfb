//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod redirect;
pub mod urls;
pub mod users;

pub use auth::{login_handler, logout_handler, refresh_handler, signup_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{
    create_url_handler, delete_url_handler, list_user_urls_handler, update_url_handler,
};
pub use users::{delete_user_handler, get_user_handler};
