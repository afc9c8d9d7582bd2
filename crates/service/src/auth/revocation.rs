use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Process-wide set of revoked token strings.
///
/// Each entry carries the token's natural expiration: a token never needs
/// revocation-checking after it would have expired anyway, so dead entries
/// are pruned lazily on insert and the set stays bounded by the number of
/// live revoked tokens. Safe for concurrent insert and lookup from many
/// request-handling tasks without external locking.
#[derive(Clone, Default)]
pub struct RevocationStore {
    inner: Arc<DashMap<String, DateTime<Utc>>>,
}

impl RevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert.
    pub fn add(&self, token: &str, expires_at: DateTime<Utc>) {
        self.prune();
        self.inner.insert(token.to_owned(), expires_at);
    }

    /// Membership test. Entries past their recorded expiration do not count
    /// as revoked and are dropped on the way out.
    pub fn is_revoked(&self, token: &str) -> bool {
        let now = Utc::now();
        let live = match self.inner.get(token) {
            Some(entry) => *entry.value() > now,
            None => return false,
        };
        if !live {
            self.inner.remove_if(token, |_, expires_at| *expires_at <= now);
        }
        live
    }

    /// Drop entries whose tokens have outlived their own expiration.
    /// Returns how many were removed.
    pub fn prune(&self) -> usize {
        let now = Utc::now();
        let before = self.inner.len();
        self.inner.retain(|_, expires_at| *expires_at > now);
        before.saturating_sub(self.inner.len())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn add_then_lookup() {
        let store = RevocationStore::new();
        store.add("tok-a", Utc::now() + Duration::hours(1));
        assert!(store.is_revoked("tok-a"));
        assert!(!store.is_revoked("tok-b"));
    }

    #[test]
    fn add_is_idempotent() {
        let store = RevocationStore::new();
        let exp = Utc::now() + Duration::hours(1);
        store.add("tok-a", exp);
        store.add("tok-a", exp);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn entries_past_expiry_are_not_revoked() {
        let store = RevocationStore::new();
        store.add("tok-old", Utc::now() - Duration::seconds(5));
        assert!(!store.is_revoked("tok-old"));
        // the dead entry is dropped by the lookup
        assert!(store.is_empty());
    }

    #[test]
    fn prune_drops_only_dead_entries() {
        let store = RevocationStore::new();
        store.add("tok-live", Utc::now() + Duration::hours(1));
        // bypass add() so the dead entry is actually present
        store.inner.insert("tok-dead".into(), Utc::now() - Duration::hours(1));
        assert_eq!(store.prune(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.is_revoked("tok-live"));
    }

    #[test]
    fn concurrent_insert_and_lookup() {
        let store = RevocationStore::new();
        let exp = Utc::now() + Duration::hours(1);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let token = format!("tok-{}", i % 4);
                    store.add(&token, exp);
                    assert!(store.is_revoked(&token));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 4);
    }
}
