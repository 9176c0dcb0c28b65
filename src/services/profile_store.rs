use crate::core::{apply_swipe, initialize_profile};
use crate::models::{CandidateAttributes, PreferenceProfile, SwipeAction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur with profile store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No profile session for user: {0}")]
    NotFound(String),
}

/// A user's profile together with session bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSession {
    pub profile: PreferenceProfile,
    pub swipe_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileSession {
    fn new(profile: PreferenceProfile) -> Self {
        let now = Utc::now();
        Self {
            profile,
            swipe_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Outcome of recording a swipe into a session
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub session: ProfileSession,
    pub accepted_categories: usize,
}

/// In-memory store of per-user profile sessions
///
/// Sessions are evicted after `idle_timeout` without access or when the
/// store exceeds its capacity. Each session sits behind its own mutex so
/// swipes for one user are applied one at a time.
pub struct ProfileStore {
    sessions: moka::future::Cache<String, Arc<Mutex<ProfileSession>>>,
}

impl ProfileStore {
    /// Create a new profile store
    pub fn new(max_sessions: u64, idle_timeout_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(idle_timeout_secs))
            .build();

        Self { sessions }
    }

    /// Fetch the session for a user, creating an empty one if needed
    pub async fn session_or_init(&self, user_id: &str) -> Arc<Mutex<ProfileSession>> {
        self.sessions
            .get_with(user_id.to_string(), async {
                tracing::debug!("Starting profile session: {}", user_id);
                Arc::new(Mutex::new(ProfileSession::new(initialize_profile())))
            })
            .await
    }

    /// Snapshot of an existing session
    pub async fn get(&self, user_id: &str) -> Result<ProfileSession, StoreError> {
        let session = self
            .sessions
            .get(user_id)
            .await
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;

        let guard = session.lock().await;
        Ok(guard.clone())
    }

    /// Apply a swipe to the user's session, creating it if needed
    pub async fn record_swipe(
        &self,
        user_id: &str,
        candidate: &CandidateAttributes,
        action: SwipeAction,
    ) -> SwipeOutcome {
        let session = self.session_or_init(user_id).await;
        let mut guard = session.lock().await;

        let accepted_categories = apply_swipe(&mut guard.profile, candidate, action);
        guard.swipe_count += 1;
        guard.updated_at = Utc::now();

        tracing::trace!(
            "Swipe {:?} applied for {} ({} categories)",
            action,
            user_id,
            accepted_categories
        );

        SwipeOutcome {
            session: guard.clone(),
            accepted_categories,
        }
    }

    /// Replace the user's session with a freshly bootstrapped profile
    pub async fn bootstrap(&self, user_id: &str, profile: PreferenceProfile) -> ProfileSession {
        let session = ProfileSession::new(profile);
        self.sessions
            .insert(user_id.to_string(), Arc::new(Mutex::new(session.clone())))
            .await;

        tracing::debug!("Bootstrapped profile session: {}", user_id);
        session
    }

    /// Profile for scoring; users without a session get an empty profile
    pub async fn profile_or_default(&self, user_id: &str) -> PreferenceProfile {
        match self.get(user_id).await {
            Ok(session) => session.profile,
            Err(_) => initialize_profile(),
        }
    }

    /// Drop a user's session
    pub async fn remove(&self, user_id: &str) -> Result<(), StoreError> {
        self.sessions
            .remove(user_id)
            .await
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))
    }

    /// Get store statistics
    pub async fn stats(&self) -> StoreStats {
        self.sessions.run_pending_tasks().await;
        StoreStats {
            active_sessions: self.sessions.entry_count(),
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub active_sessions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeMap, Category, PreferenceValue};

    #[tokio::test]
    async fn test_missing_session_is_not_found() {
        let store = ProfileStore::new(100, 60);

        assert!(matches!(store.get("ghost").await, Err(StoreError::NotFound(_))));
        assert!(store.remove("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_record_swipe_creates_session() {
        let store = ProfileStore::new(100, 60);
        let candidate = AttributeMap::new().with(Category::Cleanliness, 6.0);

        let outcome = store.record_swipe("user1", &candidate, SwipeAction::Like).await;

        assert_eq!(outcome.accepted_categories, 1);
        assert_eq!(outcome.session.swipe_count, 1);

        let session = store.get("user1").await.unwrap();
        assert_eq!(
            session.profile.value(Category::Cleanliness),
            Some(PreferenceValue::Number(6.0))
        );
    }

    #[tokio::test]
    async fn test_concurrent_swipes_are_not_lost() {
        let store = Arc::new(ProfileStore::new(100, 60));
        let candidate = AttributeMap::new().with(Category::Pets, true);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                let candidate = candidate.clone();
                tokio::spawn(async move {
                    store.record_swipe("busy", &candidate, SwipeAction::Like).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let session = store.get("busy").await.unwrap();
        assert_eq!(session.swipe_count, 16);
        assert_eq!(session.profile.get(Category::Pets).unwrap().observation_count(), 16);
    }

    #[tokio::test]
    async fn test_bootstrap_replaces_session() {
        let store = ProfileStore::new(100, 60);
        let candidate = AttributeMap::new().with(Category::Noise, 9.0);
        store.record_swipe("user2", &candidate, SwipeAction::Like).await;

        let profile = crate::core::bootstrap_profile(&AttributeMap::new().with(Category::Noise, 2.0));
        store.bootstrap("user2", profile).await;

        let session = store.get("user2").await.unwrap();
        assert_eq!(session.swipe_count, 0);
        assert_eq!(session.profile.value(Category::Noise), Some(PreferenceValue::Number(2.0)));
    }

    #[tokio::test]
    async fn test_remove_and_stats() {
        let store = ProfileStore::new(100, 60);
        store.session_or_init("a").await;
        store.session_or_init("b").await;

        assert_eq!(store.stats().await.active_sessions, 2);

        store.remove("a").await.unwrap();
        assert_eq!(store.stats().await.active_sessions, 1);
        assert_eq!(store.profile_or_default("a").await, initialize_profile());
    }
}
