use async_trait::async_trait;
use cinebook_core::StoreError;
use uuid::Uuid;

use crate::session::Session;
use crate::user::{Admin, User};

/// Access to the users and admins collections.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `StoreError::Duplicate` when the
    /// username or email is already taken.
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError>;

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError>;
}

/// Access to the sessions collection, keyed by token.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert_session(&self, session: &Session) -> Result<(), StoreError>;

    async fn get_session(&self, token: &str) -> Result<Option<Session>, StoreError>;

    /// Idempotent; deleting an absent token is not an error.
    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;
}
