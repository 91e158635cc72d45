//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use super::ServiceError;
use super::user_service::{CreateUserRequest, UpdateUserRequest, UserService};
use super::validation::validate_required;
use crate::config::SecurityConfig;
use crate::db::repositories::user::hash_password_blocking;
use crate::db::{NewUser, Store, User, UserChanges};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    async fn hash(&self, password: String) -> Result<String, ServiceError> {
        hash_password_blocking(password, self.security.clone())
            .await
            .map_err(|e| ServiceError::Internal(format!("{e:#}")))
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, ServiceError> {
        validate_required("username", &request.username)?;
        validate_required("password", &request.password)?;

        let password_hash = self.hash(request.password).await?;
        let what = format!("User '{}'", request.username);

        self.store
            .create_user(NewUser {
                username: request.username,
                password_hash,
                email: request.email,
                role: request.role,
            })
            .await
            .map_err(|e| ServiceError::from_store(&e, &what))
    }

    async fn update_user(
        &self,
        username: &str,
        request: UpdateUserRequest,
    ) -> Result<User, ServiceError> {
        if let Some(new_name) = &request.username {
            validate_required("username", new_name)?;
        }

        let password_hash = match request.password {
            Some(password) => {
                validate_required("password", &password)?;
                Some(self.hash(password).await?)
            }
            None => None,
        };

        let what = format!(
            "User '{}'",
            request.username.as_deref().unwrap_or(username)
        );

        self.store
            .update_user_by_username(
                username,
                UserChanges {
                    username: request.username,
                    password_hash,
                    email: request.email,
                    role: request.role,
                },
            )
            .await
            .map_err(|e| ServiceError::from_store(&e, &what))?
            .ok_or_else(|| ServiceError::not_found("User", username))
    }

    async fn get_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, ServiceError> {
        self.store
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user with email {email}")))
    }

    async fn get_by_role(&self, role: &str) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.get_users_by_role(role).await?)
    }
}
