use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use cinebook_core::StoreError;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::SessionRepository;

/// Session lifetime, fixed at 24 hours from issue.
pub const SESSION_TTL_HOURS: i64 = 24;

/// A bearer session record. State machine per token:
/// absent -> active -> (expired | revoked).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Issues, resolves, and revokes opaque session tokens.
///
/// Expiry is lazy: an expired record is deleted on the first resolve that
/// observes it; there is no background sweep.
pub struct SessionManager {
    sessions: Arc<dyn SessionRepository>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            sessions,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Create a session for a user and return its token.
    ///
    /// Multiple concurrent sessions per user are permitted.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, StoreError> {
        let session = Session {
            token: generate_token(),
            user_id,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.insert_session(&session).await?;
        Ok(session.token)
    }

    /// Map a token to its user, or None for absent/expired tokens.
    pub async fn resolve(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        let session = match self.sessions.get_session(token).await? {
            Some(session) => session,
            None => return Ok(None),
        };

        if session.expires_at <= Utc::now() {
            self.sessions.delete_session(token).await?;
            return Ok(None);
        }

        Ok(Some(session.user_id))
    }

    /// Delete a session unconditionally. Revoking an absent token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        self.sessions.delete_session(token).await
    }
}

/// 32 bytes of OS entropy, base64url without padding (43 characters).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinebook_store::MemoryStore;

    #[test]
    fn test_token_is_url_safe_and_unpadded() {
        let token = generate_token();
        assert_eq!(token.len(), 43);
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    fn manager() -> (Arc<MemoryStore>, SessionManager) {
        let store = Arc::new(MemoryStore::new());
        let manager = SessionManager::new(store.clone());
        (store, manager)
    }

    #[tokio::test]
    async fn test_issue_then_resolve() {
        let (_, manager) = manager();
        let user_id = Uuid::new_v4();

        let token = manager.issue(user_id).await.unwrap();
        assert_eq!(manager.resolve(&token).await.unwrap(), Some(user_id));
    }

    #[tokio::test]
    async fn test_expiry_is_24_hours_out() {
        let (store, manager) = manager();

        let token = manager.issue(Uuid::new_v4()).await.unwrap();
        let session = store.get_session(&token).await.unwrap().unwrap();

        let remaining = session.expires_at - Utc::now();
        assert!(remaining > Duration::hours(23));
        assert!(remaining <= Duration::hours(24));
    }

    #[tokio::test]
    async fn test_absent_token_resolves_to_none() {
        let (_, manager) = manager();
        assert_eq!(manager.resolve("no-such-token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_token_is_lazily_deleted() {
        let (store, manager) = manager();

        let session = Session {
            token: generate_token(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() - Duration::minutes(1),
        };
        store.insert_session(&session).await.unwrap();

        assert_eq!(manager.resolve(&session.token).await.unwrap(), None);
        // The first post-expiry check removed the record.
        assert!(store.get_session(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_near_expiry_still_resolves() {
        let (store, manager) = manager();

        let session = Session {
            token: generate_token(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + Duration::minutes(1),
        };
        store.insert_session(&session).await.unwrap();

        assert_eq!(
            manager.resolve(&session.token).await.unwrap(),
            Some(session.user_id)
        );
    }

    #[tokio::test]
    async fn test_concurrent_sessions_per_user() {
        let (_, manager) = manager();
        let user_id = Uuid::new_v4();

        let first = manager.issue(user_id).await.unwrap();
        let second = manager.issue(user_id).await.unwrap();

        assert_eq!(manager.resolve(&first).await.unwrap(), Some(user_id));
        assert_eq!(manager.resolve(&second).await.unwrap(), Some(user_id));
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let (_, manager) = manager();

        let token = manager.issue(Uuid::new_v4()).await.unwrap();
        manager.revoke(&token).await.unwrap();
        assert_eq!(manager.resolve(&token).await.unwrap(), None);
        // Revoking again is a no-op, not an error.
        manager.revoke(&token).await.unwrap();
    }
}
