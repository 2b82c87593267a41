use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::record::LogRecord;

/// Default time a loaded log stays fresh
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

/// Default ceiling on the number of cached records
pub const DEFAULT_MAX_CACHED_RECORDS: usize = 5_000;

/// Freshness policy for [`LogCache`]
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entries older than this are reloaded
    pub ttl: Duration,
    /// Entries with more records than this are never served
    pub max_records: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_records: DEFAULT_MAX_CACHED_RECORDS,
        }
    }
}

#[derive(Debug)]
struct CachedLog {
    records: Arc<Vec<LogRecord>>,
    loaded_at: Instant,
}

/// Cache of a loaded workout log.
///
/// Loading happens while the cache lock is held, so at most one load is in
/// flight: callers arriving during a load wait for it and then see its result.
#[derive(Debug, Default)]
pub struct LogCache {
    config: CacheConfig,
    entry: Mutex<Option<CachedLog>>,
}

impl LogCache {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entry: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<CachedLog>> {
        // A panic inside a loader leaves no partial entry behind
        self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn is_fresh(&self, cached: &CachedLog) -> bool {
        cached.loaded_at.elapsed() < self.config.ttl
            && cached.records.len() <= self.config.max_records
    }

    /// Return the cached records, or run `loader` and cache its result.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error; the cache is left empty in that case.
    pub fn get_or_load<E, F>(&self, loader: F) -> Result<Arc<Vec<LogRecord>>, E>
    where
        F: FnOnce() -> Result<Vec<LogRecord>, E>,
    {
        let mut entry = self.lock();

        if let Some(cached) = entry.as_ref() {
            if self.is_fresh(cached) {
                return Ok(Arc::clone(&cached.records));
            }
            debug!(
                records = cached.records.len(),
                age_ms = cached.loaded_at.elapsed().as_millis(),
                "cached log is stale"
            );
        }
        *entry = None;

        let records = Arc::new(loader()?);
        debug!(records = records.len(), "cached freshly loaded log");
        *entry = Some(CachedLog {
            records: Arc::clone(&records),
            loaded_at: Instant::now(),
        });

        Ok(records)
    }

    /// The cached records, if they are still fresh
    #[must_use]
    pub fn get(&self) -> Option<Arc<Vec<LogRecord>>> {
        self.lock()
            .as_ref()
            .filter(|cached| self.is_fresh(cached))
            .map(|cached| Arc::clone(&cached.records))
    }

    /// Drop the cached entry; the next access reloads
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lock().as_ref().is_some_and(|cached| self.is_fresh(cached))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn records(n: usize) -> Vec<LogRecord> {
        (0..n)
            .map(|i| LogRecord::new("2024-01-15", format!("Exercise {i}"), 5, 10.0))
            .collect()
    }

    fn load(counter: &AtomicUsize, n: usize) -> Result<Vec<LogRecord>, std::io::Error> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(records(n))
    }

    #[test]
    fn test_second_access_is_cached() {
        let cache = LogCache::default();
        let loads = AtomicUsize::new(0);

        let first = cache.get_or_load(|| load(&loads, 3)).unwrap();
        let second = cache.get_or_load(|| load(&loads, 3)).unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_valid());
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let cache = LogCache::default();
        let loads = AtomicUsize::new(0);

        cache.get_or_load(|| load(&loads, 1)).unwrap();
        cache.invalidate();
        assert!(!cache.is_valid());
        assert!(cache.get().is_none());

        cache.get_or_load(|| load(&loads, 1)).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_expired_entry_reloads() {
        let cache = LogCache::new(CacheConfig {
            ttl: Duration::ZERO,
            ..CacheConfig::default()
        });
        let loads = AtomicUsize::new(0);

        cache.get_or_load(|| load(&loads, 1)).unwrap();
        cache.get_or_load(|| load(&loads, 1)).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_oversized_entry_is_never_served() {
        let cache = LogCache::new(CacheConfig {
            max_records: 2,
            ..CacheConfig::default()
        });
        let loads = AtomicUsize::new(0);

        let loaded = cache.get_or_load(|| load(&loads, 3)).unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(!cache.is_valid());

        cache.get_or_load(|| load(&loads, 3)).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let cache = LogCache::default();
        let result: Result<_, std::io::Error> =
            cache.get_or_load(|| Err(std::io::Error::other("disk gone")));
        assert!(result.is_err());
        assert!(!cache.is_valid());
    }

    #[test]
    fn test_concurrent_callers_share_one_load() {
        let cache = Arc::new(LogCache::default());
        let loads = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let loads = Arc::clone(&loads);
                thread::spawn(move || {
                    cache
                        .get_or_load(|| {
                            thread::sleep(Duration::from_millis(20));
                            load(&loads, 4)
                        })
                        .unwrap()
                        .len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
