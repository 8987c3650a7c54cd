//! Blame lookup endpoint.
//!
//! GET /api/v1/blame?path=<path>&line=<line>
//!
//! Returns the attribution for one line of a file:
//! - `attribution` object (author, relative date, message) on success
//! - `attribution: null` when the lookup is suppressed (service disabled or
//!   git has no blame data for the line)
//!
//! Used by: editor plugins to render inline blame for the cursor line. This
//! is also the "force a lookup" action; it consults the cache first either way.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::git::{BlameService, GitInvoker};
use crate::models::BlameResponse;

pub fn routes<G: GitInvoker>(service: Arc<BlameService<G>>) -> Router {
    Router::new()
        .route("/api/v1/blame", get(get_blame::<G>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct BlameQuery {
    path: String,
    line: u32,
}

async fn get_blame<G: GitInvoker>(
    State(service): State<Arc<BlameService<G>>>,
    Query(query): Query<BlameQuery>,
) -> Result<Json<BlameResponse>> {
    if query.path.trim().is_empty() {
        return Err(AppError::InvalidPath(query.path));
    }
    if query.line == 0 {
        return Err(AppError::InvalidLine(query.line));
    }

    let attribution = service.lookup(&query.path, query.line).await;
    Ok(Json(BlameResponse {
        path: query.path,
        line: query.line,
        attribution,
    }))
}
