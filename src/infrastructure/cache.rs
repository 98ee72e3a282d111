//! Read-through cache for single-entity lookups

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;

use crate::domain::DomainError;

/// Entities keyed by identifier. Misses go to the loader; only hits
/// (`Some`) are remembered, so a later insert is never masked.
pub struct ReadThroughCache<V> {
    name: &'static str,
    enabled: bool,
    entries: Arc<DashMap<i64, V>>,
}

impl<V> Clone for ReadThroughCache<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            enabled: self.enabled,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V: Clone> ReadThroughCache<V> {
    pub fn new(name: &'static str, enabled: bool) -> Self {
        Self {
            name,
            enabled,
            entries: Arc::new(DashMap::new()),
        }
    }

    pub async fn get_or_load<F, Fut>(&self, id: i64, load: F) -> Result<Option<V>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, DomainError>>,
    {
        if !self.enabled {
            return load().await;
        }

        if let Some(hit) = self.entries.get(&id) {
            tracing::trace!(cache = self.name, id, "cache hit");
            return Ok(Some(hit.value().clone()));
        }

        let loaded = load().await?;
        if let Some(value) = &loaded {
            self.entries.insert(id, value.clone());
        }
        Ok(loaded)
    }

    pub fn invalidate(&self, id: i64) {
        if self.entries.remove(&id).is_some() {
            tracing::trace!(cache = self.name, id, "cache entry evicted");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let cache = ReadThroughCache::new("test", true);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_load(1, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Some("one".to_string()))
                })
                .await
                .unwrap();
            assert_eq!(value.as_deref(), Some("one"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn misses_are_not_remembered() {
        let cache: ReadThroughCache<String> = ReadThroughCache::new("test", true);

        let first = cache.get_or_load(9, || async { Ok(None) }).await.unwrap();
        assert!(first.is_none());
        assert!(cache.is_empty());

        let second = cache
            .get_or_load(9, || async { Ok(Some("late".to_string())) })
            .await
            .unwrap();
        assert_eq!(second.as_deref(), Some("late"));
    }

    #[tokio::test]
    async fn invalidate_forces_a_reload() {
        let cache = ReadThroughCache::new("test", true);
        cache
            .get_or_load(1, || async { Ok(Some(1)) })
            .await
            .unwrap();
        cache.invalidate(1);

        let reloaded = cache
            .get_or_load(1, || async { Ok(Some(2)) })
            .await
            .unwrap();
        assert_eq!(reloaded, Some(2));
    }

    #[tokio::test]
    async fn disabled_cache_always_loads() {
        let cache = ReadThroughCache::new("test", false);
        cache
            .get_or_load(1, || async { Ok(Some(1)) })
            .await
            .unwrap();
        assert!(cache.is_empty());
    }
}
