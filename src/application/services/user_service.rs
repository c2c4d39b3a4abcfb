//! User profile and account removal service.

use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for reading public profiles and deleting accounts.
pub struct UserService<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such user exists.
    pub async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Deletes an account together with its URLs.
    ///
    /// Only the account owner may delete it. URL rows go with the account
    /// via the foreign key cascade.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if `requester_id` is not `id` and
    /// [`AppError::NotFound`] if the account does not exist.
    pub async fn delete_account(&self, requester_id: i64, id: i64) -> Result<(), AppError> {
        if requester_id != id {
            return Err(AppError::forbidden(
                "You can only delete your own account",
                json!({ "id": id }),
            ));
        }

        let deleted = self.user_repository.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }

        Ok(())
    }
}
