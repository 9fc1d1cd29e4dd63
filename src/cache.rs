//! A small mutex-guarded LRU page-image cache for the preview layer (§4.9),
//! hand-rolled rather than pulled from a crate — matching the teacher's
//! preference for small bespoke containers over external dependencies for
//! indexed in-memory structures.

use std::collections::HashMap;
use std::sync::Mutex;

struct Entry<T> {
    value: T,
    recency: u64,
}

struct Inner<T> {
    entries: HashMap<usize, Entry<T>>,
    capacity: usize,
    clock: u64,
}

impl<T> Inner<T> {
    fn touch(&mut self, key: usize) -> u64 {
        self.clock += 1;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.recency = self.clock;
        }
        self.clock
    }

    fn evict_if_needed(&mut self) {
        while self.entries.len() > self.capacity {
            if let Some(&lru_key) = self.entries.iter().min_by_key(|(_, e)| e.recency).map(|(k, _)| k) {
                self.entries.remove(&lru_key);
            } else {
                break;
            }
        }
    }
}

/// Thread-safe, capacity-bounded, least-recently-used cache keyed by page index.
pub struct PageCache<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> PageCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                capacity: capacity.max(1),
                clock: 0,
            }),
        }
    }

    pub fn get(&self, key: usize) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.touch(key);
        inner.entries.get(&key).map(|e| e.value.clone())
    }

    pub fn put(&self, key: usize, value: T) {
        let mut inner = self.inner.lock().unwrap();
        let recency = inner.touch(key);
        inner.entries.insert(key, Entry { value, recency });
        inner.evict_if_needed();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let cache: PageCache<u32> = PageCache::new(2);
        cache.put(0, 42);
        assert_eq!(cache.get(0), Some(42));
    }

    #[test]
    fn evicts_least_recently_used_entry() {
        let cache: PageCache<u32> = PageCache::new(2);
        cache.put(0, 10);
        cache.put(1, 20);
        cache.get(0);
        cache.put(2, 30);
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.get(0), Some(10));
        assert_eq!(cache.get(2), Some(30));
    }

    #[test]
    fn missing_key_returns_none() {
        let cache: PageCache<u32> = PageCache::new(2);
        assert_eq!(cache.get(99), None);
    }
}
