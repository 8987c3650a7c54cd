//! API route handlers - maps HTTP endpoints to lookup-service operations.
//!
//! Each submodule defines routes for a feature area:
//! - `blame`: Per-line attribution lookup
//! - `cache`: Cache dump and clear
//! - `service`: Enabled/disabled state and toggle

pub mod blame;
pub mod cache;
pub mod service;

use std::sync::Arc;

use axum::Router;

use crate::git::{BlameService, GitInvoker};

pub fn create_router<G: GitInvoker>(service: Arc<BlameService<G>>) -> Router {
    Router::new()
        .merge(blame::routes(service.clone()))
        .merge(cache::routes(service.clone()))
        .merge(service::routes(service))
}
