use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{
    AuthService, RedirectService, TokenManager, UrlService, UserService,
};
use crate::domain::repositories::SessionStore;
use crate::infrastructure::persistence::{PgUrlRepository, PgUserRepository};

/// Shared application state handed to every handler.
///
/// Cheap to clone; every field is either an `Arc` or already clone-friendly.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub url_service: Arc<UrlService<PgUrlRepository>>,
    pub redirect_service: Arc<RedirectService<PgUrlRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub token_manager: TokenManager,
    pub session_store: Arc<dyn SessionStore>,
    pub db: PgPool,
    pub refresh_ttl_secs: i64,
}
