//! Domain service for user accounts.
//!
//! Passwords arrive in plaintext and are hashed with Argon2id before they
//! reach the store; responses never carry the hash.

use serde::Deserialize;

use super::ServiceError;
use crate::db::User;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Conflict`] if the username is taken.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, ServiceError>;

    async fn update_user(
        &self,
        username: &str,
        request: UpdateUserRequest,
    ) -> Result<User, ServiceError>;

    async fn get_by_username(&self, username: &str) -> Result<User, ServiceError>;

    async fn get_by_email(&self, email: &str) -> Result<User, ServiceError>;

    /// All users holding `role`; empty when none do.
    async fn get_by_role(&self, role: &str) -> Result<Vec<User>, ServiceError>;
}
