use std::sync::Arc;

use cinebook_core::StoreError;
use serde::Deserialize;
use tracing::info;

use crate::credentials::{hash_password, verify_password};
use crate::repository::UserRepository;
use crate::user::{Admin, User};
use crate::validation;

/// Registration payload as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration and credential checks over the users/admins collections.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Validate, uniqueness-check, and create a new user account.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let fullname = request.fullname.trim();
        if fullname.chars().count() < 2 {
            return Err(AuthError::Validation(
                "Full name must be at least 2 characters long".to_string(),
            ));
        }
        if !validation::validate_username(&request.username) {
            return Err(AuthError::Validation(
                "Username must be 3-20 characters long and contain only letters, numbers, and underscores"
                    .to_string(),
            ));
        }
        if !validation::validate_email(&request.email) {
            return Err(AuthError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if !validation::validate_phone(&request.phone) {
            return Err(AuthError::Validation(
                "Please enter a valid phone number".to_string(),
            ));
        }
        if let Some(error) = validation::validate_password(&request.password).first() {
            return Err(AuthError::Validation((*error).to_string()));
        }
        if request.password != request.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        if self.users.user_by_username(&request.username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if self.users.user_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = User::new(
            fullname.to_string(),
            request.username,
            request.email,
            request.phone,
            hash_password(&request.password),
        );

        // The store re-checks uniqueness on insert; a concurrent duplicate
        // surfaces here rather than corrupting the collection.
        match self.users.create_user(&user).await {
            Ok(()) => {
                info!(user_id = %user.user_id, "registered user");
                Ok(user)
            }
            Err(StoreError::Duplicate { field: "username" }) => Err(AuthError::UsernameTaken),
            Err(StoreError::Duplicate { field: "email" }) => Err(AuthError::EmailTaken),
            Err(other) => Err(AuthError::Storage(other)),
        }
    }

    /// Check a username/password pair against the users collection.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Same contract as `login`, against the admins collection.
    pub async fn login_admin(&self, username: &str, password: &str) -> Result<Admin, AuthError> {
        let admin = self
            .users
            .admin_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &admin.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(admin)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}
