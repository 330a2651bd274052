//! In-memory admin session registry
//!
//! Sessions are never persisted and never expire. They live until the
//! process exits, so every restart signs all admins out.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// One authenticated admin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Bearer token, also the registry key
    pub token: String,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Registry of issued tokens shared by all request handlers
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

impl SessionStore {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under its token
    pub async fn insert(&self, session: AdminSession) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session);
    }

    /// Look up the session issued for `token`
    pub async fn get(&self, token: &str) -> Option<AdminSession> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Number of registered sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> AdminSession {
        AdminSession {
            token: token.to_string(),
            username: "admin".to_string(),
            logged_in_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = SessionStore::new();
        let expected = session("abc");

        store.insert(expected.clone()).await;

        assert_eq!(store.get("abc").await, Some(expected));
        assert_eq!(store.get("abd").await, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_registry() {
        let store = SessionStore::new();
        let handle = store.clone();

        handle.insert(session("shared")).await;

        assert!(store.get("shared").await.is_some());
    }

    #[tokio::test]
    async fn concurrent_inserts_are_all_kept() {
        let store = SessionStore::new();

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(session(&format!("token-{i}"))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.len().await, 64);
        for i in 0..64 {
            assert!(store.get(&format!("token-{i}")).await.is_some());
        }
    }
}
