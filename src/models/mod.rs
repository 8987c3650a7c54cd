//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for editor-plugin consumption.
//! - `attribution`: Attribution, BlameResponse for line lookups
//! - `cache`: CacheDump, CacheStatsBody, ClearResponse, ServiceState

pub mod attribution;
pub mod cache;

pub use attribution::*;
pub use cache::*;
