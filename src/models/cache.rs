//! Cache inspection data transfer objects.
//!
//! Serialized forms of the cache dump and statistics endpoints. The dump is a
//! flat list of pre-formatted `"file:line = author date message"` strings so a
//! client can show it verbatim in a popup.

use serde::Serialize;

/// Response for the cache dump endpoint.
#[derive(Debug, Serialize)]
pub struct CacheDump {
    /// One line per cached entry, unordered
    pub entries: Vec<String>,
    pub stats: CacheStatsBody,
}

/// Cache statistics, also returned standalone after a clear.
#[derive(Debug, Serialize)]
pub struct CacheStatsBody {
    /// Entries currently cached
    pub entries: usize,
    /// Configured entry cap
    pub cap: usize,
    /// Seconds since the current cache generation was created
    pub age_secs: u64,
}

/// Response after clearing the cache.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Number of entries removed
    pub cleared: usize,
}

/// Enabled/disabled state of the lookup service.
#[derive(Debug, Serialize)]
pub struct ServiceState {
    pub enabled: bool,
}
