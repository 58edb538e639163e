use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Upper bound on how far ahead an entry may expire.
const MAX_TTL: Duration = Duration::from_secs(86_400);

/// Key/value store with per-entry TTL, shared by every planning request.
pub trait SharedCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String, ttl: Duration);
}

/// In-process cache. Expired entries are dropped on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, (String, Instant)>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(key) {
            let (value, expires_at) = entry.value();
            if Instant::now() < *expires_at {
                return Some(value.clone());
            }
        }
        self.entries
            .remove_if(key, |_, (_, expires_at)| Instant::now() >= *expires_at);
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or(now);
        self.entries.insert(key.to_string(), (value, expires_at));
    }
}
