//! In-memory state: the rotating risk feed and the push token registry

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{LatestRisk, PushRegistration, RegisterTokenRequest};

/// Serves snapshots in order, wrapping around
pub struct RiskFeed {
    snapshots: Vec<LatestRisk>,
    cursor: AtomicUsize,
}

impl RiskFeed {
    pub fn new(snapshots: Vec<LatestRisk>) -> Self {
        Self {
            snapshots,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn demo() -> Self {
        Self::new(LatestRisk::demo_rotation())
    }

    pub fn next(&self) -> Option<LatestRisk> {
        if self.snapshots.is_empty() {
            return None;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.snapshots.len();
        Some(self.snapshots[idx].clone())
    }
}

/// Registrations keyed by (user_id, token)
#[derive(Default)]
pub struct TokenStore {
    registrations: RwLock<HashMap<(String, String), PushRegistration>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or touch a registration. Returns the record and whether it is new.
    pub async fn register(&self, req: RegisterTokenRequest) -> (PushRegistration, bool) {
        let now = Utc::now();
        let key = (req.user_id.clone(), req.fcm_token.clone());
        let mut registrations = self.registrations.write().await;

        if let Some(existing) = registrations.get_mut(&key) {
            existing.last_seen_at = now;
            existing.session_id = req.session_id.or(existing.session_id);
            return (existing.clone(), false);
        }

        let record = PushRegistration {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            session_id: req.session_id,
            created_at: now,
            last_seen_at: now,
        };
        registrations.insert(key, record.clone());
        (record, true)
    }

    pub async fn count(&self) -> usize {
        self.registrations.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user: &str, token: &str) -> RegisterTokenRequest {
        RegisterTokenRequest {
            user_id: user.to_string(),
            fcm_token: token.to_string(),
            session_id: None,
        }
    }

    #[test]
    fn test_feed_rotates() {
        let feed = RiskFeed::demo();
        let seen: Vec<f64> = (0..4).filter_map(|_| feed.next()).map(|r| r.p_next_hour).collect();
        assert_eq!(seen, vec![0.18, 0.46, 0.76, 0.18]);
    }

    #[test]
    fn test_empty_feed() {
        assert!(RiskFeed::new(vec![]).next().is_none());
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let store = TokenStore::new();
        let (first, created) = store.register(request("YZMM", "tok-1")).await;
        assert!(created);

        let (again, created) = store.register(request("YZMM", "tok-1")).await;
        assert!(!created);
        assert_eq!(again.id, first.id);
        assert_eq!(store.count().await, 1);

        store.register(request("YZMM", "tok-2")).await;
        assert_eq!(store.count().await, 2);
    }
}
