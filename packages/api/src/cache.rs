//! Tagged query cache.
//!
//! Each cached read is stored under a string key together with the tags it
//! provides. A mutation invalidates tags, dropping every entry that carries any
//! of them, so the next read of that data goes back to the network.
//!
//! Invalidation also bumps a generation counter per tag. A read takes a
//! [`Generation`] before fetching and stores its result only if none of its
//! tags moved on in the meantime, so a response that raced a mutation is
//! returned to its caller but never cached.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Labels connecting cached reads to the mutations that make them stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    User,
    Goal,
    Patient,
    PreventiveCare,
    Dashboard,
}

struct Entry {
    tags: &'static [Tag],
    value: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    generations: HashMap<Tag, u64>,
    /// Bumped by [`QueryCache::clear`].
    epoch: u64,
}

impl Inner {
    fn generation(&self, tags: &[Tag]) -> Generation {
        Generation {
            epoch: self.epoch,
            tags: tags
                .iter()
                .map(|tag| self.generations.get(tag).copied().unwrap_or_default())
                .sum(),
        }
    }
}

/// Snapshot of the invalidation state of some tags, taken before a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    tags: u64,
}

#[derive(Default)]
pub struct QueryCache {
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value under `key`, if present and of type `T`.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<T> {
        self.inner
            .read()
            .expect("RwLock is not poisoned")
            .entries
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>())
            .cloned()
    }

    /// Current generation of `tags`; pass it to [`QueryCache::insert_if_fresh`].
    pub fn generation(&self, tags: &[Tag]) -> Generation {
        self.inner
            .read()
            .expect("RwLock is not poisoned")
            .generation(tags)
    }

    /// Insert unless `tags` were invalidated (or the cache cleared) since
    /// `seen` was taken. Returns whether the value was stored.
    pub fn insert_if_fresh<T: Send + Sync + 'static>(
        &self,
        key: &str,
        tags: &'static [Tag],
        value: T,
        seen: Generation,
    ) -> bool {
        let mut inner = self.inner.write().expect("RwLock is not poisoned");
        if inner.generation(tags) != seen {
            tracing::debug!(key, "discarding response that raced an invalidation");
            return false;
        }
        inner.entries.insert(
            key.to_string(),
            Entry {
                tags,
                value: Arc::new(value),
            },
        );
        true
    }

    /// Drop every entry carrying one of `tags`. Returns how many were dropped.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        let mut inner = self.inner.write().expect("RwLock is not poisoned");
        for tag in tags {
            *inner.generations.entry(*tag).or_default() += 1;
        }
        let before = inner.entries.len();
        inner
            .entries
            .retain(|_, entry| !entry.tags.iter().any(|tag| tags.contains(tag)));
        let dropped = before - inner.entries.len();
        if dropped > 0 {
            tracing::debug!(?tags, dropped, "invalidated cached queries");
        }
        dropped
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().expect("RwLock is not poisoned");
        inner.entries.clear();
        inner.epoch += 1;
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("RwLock is not poisoned")
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
