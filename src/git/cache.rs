//! Per-line blame cache.
//!
//! In-memory memoization of attributions keyed by `(file, line)` to avoid
//! repeated shelling out to git under cursor movement.
//! - Insertion-only: entries are never updated or individually evicted, so a
//!   cached attribution stays fixed for the life of a generation even if the
//!   file or history changes underneath it
//! - Bounded: reaching the configured cap resets the whole map (a new
//!   generation) before the next insert
//! - Inspectable: the dump/stats surface backs the cache endpoints
//!
//! Used by: `BlameService` in lookup.rs, which owns the instance behind its
//! own mutex. The cache itself is single-owner and does no locking.

use std::collections::HashMap;
use std::time::Instant;

use crate::models::{Attribution, CacheStatsBody};

/// Identifies one cached line: exact path string + 1-based line number.
/// No path normalization is performed; `./a.rs` and `a.rs` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlameKey {
    pub path: String,
    pub line: u32,
}

impl BlameKey {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

/// Default entry cap, overridable with `--cache-cap`.
pub const DEFAULT_CACHE_CAP: usize = 4096;

pub struct BlameCache {
    entries: HashMap<BlameKey, Attribution>,
    /// Maximum entries before the map is reset
    cap: usize,
    /// When the current generation was created
    created_at: Instant,
}

impl BlameCache {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: HashMap::new(),
            cap: cap.max(1),
            created_at: Instant::now(),
        }
    }

    pub fn get(&self, key: &BlameKey) -> Option<Attribution> {
        self.entries.get(key).cloned()
    }

    /// Store unconditionally, overwriting any prior value for the key.
    /// Resets the whole map first when the cap is reached.
    pub fn put(&mut self, key: BlameKey, attribution: Attribution) {
        if self.entries.len() >= self.cap && !self.entries.contains_key(&key) {
            tracing::debug!("Blame cache cap ({}) reached, starting new generation", self.cap);
            self.clear();
        }
        self.entries.insert(key, attribution);
    }

    /// Drop every entry and start a new generation. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.created_at = Instant::now();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every entry as `"file:line = author date message"`, unordered.
    pub fn dump(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(key, attr)| {
                format!(
                    "{}:{} = {} {} {}",
                    key.path, key.line, attr.author, attr.relative_date, attr.message
                )
            })
            .collect()
    }

    pub fn stats(&self) -> CacheStatsBody {
        CacheStatsBody {
            entries: self.entries.len(),
            cap: self.cap,
            age_secs: self.created_at.elapsed().as_secs(),
        }
    }
}
