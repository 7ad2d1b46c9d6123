//! In-memory response cache with lazy TTL expiry.
//!
//! The cache is an additive optimization: a cold cache produces the same
//! results as a warm one, just slower. Entries are only ever created from
//! successful responses, keyed by a deterministic function of HTTP method,
//! path, and serialized request body, and deleted lazily by the read that
//! discovers they have expired. There is no background sweeper.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Default time-to-live for cache entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// A single cached payload.
#[derive(Clone, Debug)]
struct CacheEntry {
    /// Serialized JSON payload of the successful response.
    body: String,
    stored_at: Instant,
}

/// Administrative snapshot of cache contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of live entries.
    pub entries: usize,
    /// The composite keys currently cached.
    pub keys: Vec<String>,
}

/// Builds the composite cache key for a request.
///
/// The key is a deterministic function of method, path, and body so that
/// identical logical requests share an entry and distinct ones never collide.
pub fn cache_key(method: &str, path: &str, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("{method} {path} {body}"),
        None => format!("{method} {path}"),
    }
}

/// An in-memory map from composite request keys to cached payloads.
///
/// The map lives behind a `Mutex` held only for map operations, never across
/// an await point. Clones of the owning client share one cache.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates an empty cache with the default 5 minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Creates an empty cache with an explicit TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up a payload by key, deserializing it on hit.
    ///
    /// An entry older than the TTL is deleted by this read and reported as a
    /// miss. A payload that fails to deserialize is treated as a miss rather
    /// than an error; the caller falls through to the network.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            entries.remove(key);
            crate::observability::CACHE_EVICTIONS.click();
            return None;
        }
        serde_json::from_str(&entry.body).ok()
    }

    /// Stores a successful payload under the given key.
    pub fn put<T: Serialize>(&self, key: &str, payload: &T) -> Result<()> {
        let body = serde_json::to_string(payload)?;
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                body,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .clear();
    }

    /// Returns a snapshot of the current contents.
    ///
    /// Expired entries that have not yet been touched by a read still count;
    /// expiry is lazy by design.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            entries: entries.len(),
            keys,
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
