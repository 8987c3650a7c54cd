//! Cache inspection endpoints.
//!
//! GET    /api/v1/cache - dump every cached entry plus statistics
//! DELETE /api/v1/cache - drop all entries, report how many were removed
//!
//! The dump entries are pre-formatted `"file:line = author date message"`
//! strings, unordered, so a plugin can display them verbatim in a popup.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::git::{BlameService, GitInvoker};
use crate::models::{CacheDump, ClearResponse};

pub fn routes<G: GitInvoker>(service: Arc<BlameService<G>>) -> Router {
    Router::new()
        .route("/api/v1/cache", get(get_cache::<G>).delete(clear_cache::<G>))
        .with_state(service)
}

async fn get_cache<G: GitInvoker>(
    State(service): State<Arc<BlameService<G>>>,
) -> Result<Json<CacheDump>> {
    let entries = service.dump().await;
    let stats = service.stats().await;
    Ok(Json(CacheDump { entries, stats }))
}

async fn clear_cache<G: GitInvoker>(
    State(service): State<Arc<BlameService<G>>>,
) -> Result<Json<ClearResponse>> {
    let cleared = service.clear().await;
    tracing::info!("Blame cache cleared ({} entries)", cleared);
    Ok(Json(ClearResponse { cleared }))
}
