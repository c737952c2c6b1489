//! User service for managing user operations.

use natter_database::{DocumentStore, Repository};
use tracing::{info, warn};

use crate::entities::{CreateUserRequest, UpdateUserRequest, User};
use crate::types::{UserError, UserResult};

/// Service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: Repository<User>,
}

impl UserService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            user_repository: Repository::new(store),
        }
    }

    /// List every user; no pagination or filtering
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        Ok(self.user_repository.list().await?)
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: &str) -> UserResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::UserNotFound(user_id.to_string()))
    }

    /// Create a new user
    pub async fn create_user(&self, request: CreateUserRequest) -> UserResult<User> {
        request.validate()?;

        let user = self.user_repository.create(&request).await?;

        info!(user_id = %user.id, username = %user.username, "created user");
        Ok(user)
    }

    /// Update a user, merging the supplied fields into the stored document
    pub async fn update_user(&self, user_id: &str, request: UpdateUserRequest) -> UserResult<User> {
        request.validate()?;

        if request.is_empty() {
            return self.get_user(user_id).await;
        }

        let user = self
            .user_repository
            .update(user_id, &request)
            .await
            .map_err(|e| not_found_as(user_id, e))?;

        info!(user_id = %user.id, "updated user");
        Ok(user)
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: &str) -> UserResult<()> {
        self.user_repository
            .delete(user_id)
            .await
            .map_err(|e| not_found_as(user_id, e))?;

        warn!(user_id, "deleted user");
        Ok(())
    }

    pub async fn count_users(&self) -> UserResult<usize> {
        Ok(self.user_repository.count().await?)
    }
}

fn not_found_as(user_id: &str, error: natter_database::DatabaseError) -> UserError {
    match UserError::from(error) {
        UserError::UserNotFound(_) => UserError::UserNotFound(user_id.to_string()),
        other => other,
    }
}
