//! Blame lookup orchestration.
//!
//! `BlameService` is the one stateful object in the crate: it owns the cache,
//! the enabled flag, and the git invoker, and runs the lookup pipeline
//! cache-check → blame → hash → show → parse → cache-store.
//!
//! Error policy: everything git-related is absorbed here. Callers only ever
//! see `Some(Attribution)` (possibly the sentinel) or `None` (suppressed: no
//! data for the line, or the service is disabled). Nothing is retried; a
//! sentinel produced by a transient git failure stays cached like any other
//! entry.
//!
//! Concurrent lookups for the same key are collapsed single-flight style: one
//! leader runs the subprocess pair, followers wait and share its outcome, so
//! rapid repeat requests for one line spawn at most one blame+show pair.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::git::cache::{BlameCache, BlameKey};
use crate::git::invoker::GitInvoker;
use crate::git::parser::{self, ParseError};
use crate::models::{Attribution, CacheStatsBody};

/// Per-key in-flight slot. The leader fills `outcome` once; followers queued
/// on the mutex read it instead of spawning their own subprocesses.
#[derive(Default)]
struct Inflight {
    outcome: Mutex<Option<Option<Attribution>>>,
}

pub struct BlameService<G: GitInvoker> {
    invoker: G,
    enabled: AtomicBool,
    cache: Mutex<BlameCache>,
    inflight: Mutex<HashMap<BlameKey, Arc<Inflight>>>,
}

impl<G: GitInvoker> BlameService<G> {
    pub fn new(invoker: G, cache_cap: usize) -> Self {
        Self {
            invoker,
            enabled: AtomicBool::new(true),
            cache: Mutex::new(BlameCache::new(cache_cap)),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the attribution for one line of a file.
    ///
    /// Returns `None` when the service is disabled or git produced no blame
    /// output for the line. `None` outcomes are never cached, so a later call
    /// retries git; every `Some` outcome is cached permanently.
    pub async fn lookup(&self, path: &str, line: u32) -> Option<Attribution> {
        if !self.enabled() {
            return None;
        }

        let key = BlameKey::new(path, line);

        if let Some(hit) = self.cache.lock().await.get(&key) {
            return Some(hit);
        }

        // Join (or create) the in-flight entry for this key
        let entry = {
            let mut inflight = self.inflight.lock().await;
            inflight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Inflight::default()))
                .clone()
        };

        let mut slot = entry.outcome.lock().await;
        if let Some(outcome) = slot.as_ref() {
            // A leader resolved this key while we were queued
            return outcome.clone();
        }

        // We are the leader. A previous leader may have cached the value and
        // retired between our cache check and joining the map, so re-check
        // before shelling out.
        // Bind the re-check result before matching so the cache guard drops
        // here; a match scrutinee's temporary would hold it across the arm
        // and deadlock the `put` below.
        let recheck = self.cache.lock().await.get(&key);
        let outcome = match recheck {
            Some(hit) => Some(hit),
            None => {
                let outcome = self.resolve(&key).await;
                if let Some(attr) = &outcome {
                    self.cache.lock().await.put(key.clone(), attr.clone());
                }
                outcome
            }
        };
        *slot = Some(outcome.clone());
        drop(slot);

        // Retire the in-flight entry; a fresh one is created for the next miss
        let mut inflight = self.inflight.lock().await;
        if let Some(current) = inflight.get(&key) {
            if Arc::ptr_eq(current, &entry) {
                inflight.remove(&key);
            }
        }

        outcome
    }

    /// Run the subprocess pair for a key. `None` means no blame data.
    async fn resolve(&self, key: &BlameKey) -> Option<Attribution> {
        let blame = self.invoker.blame_line(&key.path, key.line).await;
        let hash = parser::commit_hash(&blame)?;

        if hash == parser::ZERO_HASH {
            // Uncommitted line, nothing to show
            return Some(Attribution::sentinel());
        }

        let summary = self.invoker.show_summary(hash).await;
        if summary.is_empty() {
            // show failed outright; conflated with "not committed" on purpose
            return Some(Attribution::sentinel());
        }

        match parser::parse_attribution(&summary) {
            Ok(attr) => Some(attr),
            Err(ParseError::GitFailure) => Some(Attribution::sentinel()),
            Err(ParseError::Malformed) => Some(Attribution::raw_fallback(summary)),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Flip the enabled flag, returning the new state. While disabled, every
    /// lookup is suppressed without touching the cache or git.
    pub fn toggle(&self) -> bool {
        let now_enabled = !self.enabled.fetch_xor(true, Ordering::Relaxed);
        tracing::info!(
            "Blame lookups {}",
            if now_enabled { "enabled" } else { "disabled" }
        );
        now_enabled
    }

    pub async fn dump(&self) -> Vec<String> {
        self.cache.lock().await.dump()
    }

    pub async fn clear(&self) -> usize {
        self.cache.lock().await.clear()
    }

    pub async fn stats(&self) -> CacheStatsBody {
        self.cache.lock().await.stats()
    }
}
