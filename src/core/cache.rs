use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// In-process TTL cache for computed report views
///
/// The computation functions are pure and never cache; this collaborator is
/// injected at the report-facade level so repeated renders of the same view
/// skip recomputation. Expired entries are evicted lazily on access.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fetch a live entry, evicting it if the TTL has elapsed
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() <= self.ttl => Some(value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, (Instant::now(), value));
    }

    /// Drop every expired entry
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, (stored_at, _)| stored_at.elapsed() <= ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
