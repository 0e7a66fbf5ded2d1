//! Bounded cache of rendered line markup.
//!
//! ## Learning: FIFO with Lazy Deletion
//!
//! Entries live in a `HashMap` for O(1) lookup; a `VecDeque` records the
//! order they were inserted in. Evicting pops the queue front. Removing a
//! key explicitly only touches the map: its queue slot goes stale and is
//! skipped when it reaches the front. Each entry carries the sequence
//! number of its slot so a stale slot is never mistaken for a live one.
//!
//! Eviction follows insertion order only. Reading an entry does not move
//! it, and re-inserting an existing key keeps its original position.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use quill_syntax::LanguageKind;

/// Default number of cached lines.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Identifies a rendered line: its text and the language it was
/// highlighted as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub line: String,
    pub language: LanguageKind,
}

impl CacheKey {
    pub fn new(line: impl Into<String>, language: LanguageKind) -> Self {
        Self {
            line: line.into(),
            language,
        }
    }
}

#[derive(Debug)]
struct Entry {
    html: String,
    seq: u64,
}

/// Read-only cache diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    /// `size / capacity`, 0.0 when the capacity is 0
    pub utilization: f64,
    pub usage_percent: f64,
    pub enabled: bool,
}

/// A bounded key → HTML store with first-in, first-out eviction.
#[derive(Debug)]
pub struct RenderCache {
    entries: HashMap<Rc<CacheKey>, Entry>,
    order: VecDeque<(u64, Rc<CacheKey>)>,
    capacity: usize,
    enabled: bool,
    next_seq: u64,
}

impl RenderCache {
    /// Creates an enabled cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(4096)),
            order: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            enabled: true,
            next_seq: 0,
        }
    }

    /// Looks up cached markup. Never changes eviction order.
    pub fn get(&self, key: &CacheKey) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.entries.get(key).map(|e| e.html.as_str())
    }

    /// Stores markup for `key`.
    ///
    /// A new key arriving at a full cache evicts the oldest insertion
    /// first. An existing key has its markup replaced in place.
    pub fn put(&mut self, key: CacheKey, html: String) {
        if !self.enabled || self.capacity == 0 {
            return;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.html = html;
            return;
        }

        while self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let key = Rc::new(key);
        self.order.push_back((seq, Rc::clone(&key)));
        self.entries.insert(key, Entry { html, seq });
        self.compact_if_sparse();
    }

    /// Removes one entry. Absent keys are ignored.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Changes the capacity, evicting the oldest entries until they fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.evict_oldest();
        }
    }

    /// Enables or disables caching. Disabling drops all entries.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.clear();
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        let utilization = if self.capacity == 0 {
            0.0
        } else {
            self.entries.len() as f64 / self.capacity as f64
        };

        CacheStats {
            size: self.entries.len(),
            capacity: self.capacity,
            utilization,
            usage_percent: utilization * 100.0,
            enabled: self.enabled,
        }
    }

    /// Removes the live entry inserted longest ago.
    fn evict_oldest(&mut self) {
        while let Some((seq, key)) = self.order.pop_front() {
            let live = self.entries.get(&key).is_some_and(|e| e.seq == seq);
            if live {
                self.entries.remove(&key);
                tracing::trace!(language = %key.language, "Evicted cached line");
                return;
            }
        }
    }

    /// Drops stale queue slots once they outnumber live entries.
    fn compact_if_sparse(&mut self) {
        if self.order.len() > 2 * self.entries.len() + 64 {
            let entries = &self.entries;
            self.order
                .retain(|(seq, key)| entries.get(key).is_some_and(|e| e.seq == *seq));
        }
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}
