//! In-memory login sessions
//!
//! A session is created at login and carries the username plus the
//! transient medicine list. Nothing here is persisted; a restart logs
//! everyone out. Sessions idle for longer than the store's timeout are
//! treated as logged out and evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use nutri_core::models::medicine::Medicine;
use rand::Rng;
use rand::distributions::Alphanumeric;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

const TOKEN_LEN: usize = 48;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Medicines one session may hold.
pub const MAX_SESSION_MEDICINES: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session expired. Please log in again.")]
    Expired,

    #[error("A session holds at most {} medicines", MAX_SESSION_MEDICINES)]
    MedicineLimit,
}

/// Per-request view of the caller's session, inserted by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: String,
    pub username: String,
    pub medicines: Vec<Medicine>,
}

struct Entry {
    session: SessionContext,
    last_seen: Instant,
}

/// Token to session map, shared across requests
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_timeout,
        }
    }

    fn is_idle(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.last_seen) > self.idle_timeout
    }

    /// Start a session and return its bearer token. Idle sessions are swept first.
    pub async fn create(&self, username: &str) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let now = Instant::now();
        let entry = Entry {
            session: SessionContext {
                token: token.clone(),
                username: username.to_string(),
                medicines: Vec::new(),
            },
            last_seen: now,
        };

        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, e| !self.is_idle(e, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle sessions");
        }
        sessions.insert(token.clone(), entry);
        token
    }

    /// Look up a live session and mark it as used
    pub async fn get(&self, token: &str) -> Option<SessionContext> {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(token)?;
        if self.is_idle(entry, now) {
            sessions.remove(token);
            return None;
        }
        entry.last_seen = now;
        Some(entry.session.clone())
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.inner.write().await.remove(token).is_some()
    }

    /// Drop every session belonging to a user, e.g. after account deletion
    pub async fn remove_user(&self, username: &str) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, e| e.session.username != username);
        before - sessions.len()
    }

    /// Sessions currently held, idle or not
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Append to the session's medicine list and return the updated list
    pub async fn add_medicine(
        &self,
        token: &str,
        medicine: Medicine,
    ) -> Result<Vec<Medicine>, SessionError> {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let entry = sessions
            .get_mut(token)
            .filter(|e| !self.is_idle(e, now))
            .ok_or(SessionError::Expired)?;
        if entry.session.medicines.len() >= MAX_SESSION_MEDICINES {
            return Err(SessionError::MedicineLimit);
        }
        entry.last_seen = now;
        entry.session.medicines.push(medicine);
        Ok(entry.session.medicines.clone())
    }

    pub async fn clear_medicines(&self, token: &str) -> bool {
        match self.inner.write().await.get_mut(token) {
            Some(entry) => {
                entry.session.medicines.clear();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspirin() -> Medicine {
        Medicine {
            name: "Aspirin".into(),
            dosage: "75mg".into(),
            frequency: "daily".into(),
            duration: "7 days".into(),
        }
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let store = SessionStore::new();
        let token = store.create("alice").await;
        assert_eq!(token.len(), TOKEN_LEN);

        let session = store.get(&token).await.unwrap();
        assert_eq!(session.username, "alice");
        assert!(session.medicines.is_empty());

        assert!(store.remove(&token).await);
        assert!(store.get(&token).await.is_none());
        assert!(!store.remove(&token).await);
    }

    #[tokio::test]
    async fn medicine_list_is_per_session() {
        let store = SessionStore::new();
        let a = store.create("alice").await;
        let b = store.create("bob").await;

        let list = store.add_medicine(&a, aspirin()).await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(store.get(&b).await.unwrap().medicines.is_empty());

        assert!(store.clear_medicines(&a).await);
        assert!(store.get(&a).await.unwrap().medicines.is_empty());
        assert_eq!(
            store.add_medicine("missing", aspirin()).await,
            Err(SessionError::Expired)
        );
    }

    #[tokio::test]
    async fn remove_user_drops_all_their_sessions() {
        let store = SessionStore::new();
        store.create("alice").await;
        store.create("alice").await;
        let bob = store.create("bob").await;

        assert_eq!(store.remove_user("alice").await, 2);
        assert!(store.get(&bob).await.is_some());
    }

    #[tokio::test]
    async fn medicine_list_is_capped() {
        let store = SessionStore::new();
        let token = store.create("alice").await;
        for _ in 0..MAX_SESSION_MEDICINES {
            store.add_medicine(&token, aspirin()).await.unwrap();
        }
        assert_eq!(
            store.add_medicine(&token, aspirin()).await,
            Err(SessionError::MedicineLimit)
        );
        assert_eq!(store.get(&token).await.unwrap().medicines.len(), MAX_SESSION_MEDICINES);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_session_expires() {
        let store = SessionStore::with_idle_timeout(Duration::from_secs(60));
        let token = store.create("alice").await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get(&token).await.is_some());

        // The lookup above refreshed it
        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get(&token).await.is_some());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(store.get(&token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_logins_are_evicted() {
        let store = SessionStore::with_idle_timeout(Duration::from_secs(60));
        for _ in 0..1000 {
            store.create("alice").await;
        }
        assert_eq!(store.len().await, 1000);

        tokio::time::advance(Duration::from_secs(120)).await;
        let fresh = store.create("alice").await;
        assert_eq!(store.len().await, 1);
        assert!(store.get(&fresh).await.is_some());
    }
}
