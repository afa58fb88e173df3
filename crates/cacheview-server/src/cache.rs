//! In-process cache-aside store.
//!
//! Values are kept as their JSON bytes with an expiry. Expired entries count
//! as misses and are dropped when read. Writes also sweep out every expired
//! entry, at most once per [`SWEEP_INTERVAL`].

use cacheview_core::Origin;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::AppError;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

struct Entry {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// A value together with where it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub origin: Origin,
}

pub struct CacheStore {
    entries: DashMap<String, Entry>,
    last_sweep: Mutex<Instant>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

/// `<prefix>_<hex sha256 of the JSON-encoded arguments>`
pub fn cache_key(prefix: &str, args: &impl Serialize) -> Result<String, serde_json::Error> {
    let encoded = serde_json::to_string(args)?;
    let digest = Sha256::digest(encoded.as_bytes());
    Ok(format!("{}_{}", prefix, hex::encode(digest)))
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        if self.entries.remove_if(key, |_, e| e.expires_at <= now).is_some() {
            debug!(key, "Cache entry expired");
            return None;
        }
        self.entries.get(key).map(|e| e.bytes.clone())
    }

    pub fn set(&self, key: String, bytes: Vec<u8>, ttl: Duration) {
        let now = Instant::now();
        self.sweep_if_due(now);
        self.entries.insert(
            key,
            Entry {
                bytes,
                expires_at: now + ttl,
            },
        );
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged, "Expired cache entries purged");
        }
        purged
    }

    fn sweep_if_due(&self, now: Instant) {
        let Ok(mut last) = self.last_sweep.lock() else {
            return;
        };
        if now.duration_since(*last) < SWEEP_INTERVAL {
            return;
        }
        *last = now;
        drop(last);
        self.purge_expired();
    }

    /// Drop every entry, returning how many there were
    pub fn flush_all(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached value for `prefix` + `args`, or compute and store it
    pub async fn cached<T, F, Fut>(
        &self,
        prefix: &str,
        args: &impl Serialize,
        ttl: Duration,
        compute: F,
    ) -> Result<Cached<T>, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let key = cache_key(prefix, args)?;

        if let Some(bytes) = self.get(&key) {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key, "Cache hit");
                    return Ok(Cached {
                        value,
                        origin: Origin::Cache,
                    });
                }
                Err(e) => warn!(key, "Discarding unreadable cache entry: {}", e),
            }
        }

        debug!(key, "Cache miss");
        let value = compute().await;
        self.set(key, serde_json::to_vec(&value)?, ttl);

        Ok(Cached {
            value,
            origin: Origin::Database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_cache_key_is_deterministic() {
        let a = cache_key("heavy_operation", &("abc",)).unwrap();
        let b = cache_key("heavy_operation", &("abc",)).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("heavy_operation_"));
        assert_eq!(a.len(), "heavy_operation_".len() + 64);

        assert_ne!(a, cache_key("heavy_operation", &("abd",)).unwrap());
        assert_ne!(a, cache_key("get_user_data", &("abc",)).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_hits_cache() {
        let store = CacheStore::new();
        let computed = AtomicUsize::new(0);
        let compute = || async {
            computed.fetch_add(1, Ordering::SeqCst);
            "value".to_string()
        };

        let first = store
            .cached("p", &(1,), Duration::from_secs(60), compute)
            .await
            .unwrap();
        let second = store
            .cached("p", &(1,), Duration::from_secs(60), compute)
            .await
            .unwrap();

        assert_eq!(first.origin, Origin::Database);
        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(second.value, "value");
        assert_eq!(computed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_a_miss() {
        let store = CacheStore::new();
        store.set("k".into(), b"\"v\"".to_vec(), Duration::from_secs(45));

        tokio::time::advance(Duration::from_secs(44)).await;
        assert!(store.get("k").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.get("k").is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_sweep_expired_keys() {
        let store = CacheStore::new();
        for i in 0..1000 {
            store.set(format!("k{}", i), vec![0], Duration::from_secs(60));
        }
        assert_eq!(store.len(), 1000);

        tokio::time::advance(Duration::from_secs(3600)).await;
        store.set("fresh".into(), vec![1], Duration::from_secs(60));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("fresh"), Some(vec![1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_live_entries() {
        let store = CacheStore::new();
        store.set("short".into(), vec![0], Duration::from_secs(45));
        store.set("long".into(), vec![1], Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(50)).await;
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("long"), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_flush_all() {
        let store = CacheStore::new();
        store.set("a".into(), vec![1], Duration::from_secs(1));
        store.set("b".into(), vec![2], Duration::from_secs(1));
        assert_eq!(store.flush_all(), 2);
        assert!(store.get("a").is_none());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_recomputed() {
        let store = CacheStore::new();
        let key = cache_key("p", &("x",)).unwrap();
        store.set(key, b"not json".to_vec(), Duration::from_secs(60));

        let cached = store
            .cached("p", &("x",), Duration::from_secs(60), || async { 7u64 })
            .await
            .unwrap();
        assert_eq!(cached.value, 7);
        assert_eq!(cached.origin, Origin::Database);
    }
}
