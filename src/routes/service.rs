//! Service state endpoints.
//!
//! GET  /api/v1/service        - current enabled/disabled state
//! POST /api/v1/service/toggle - flip it, returning the new state
//!
//! While disabled, every blame lookup resolves to `null` without shelling out;
//! the cache is left intact for re-enabling.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::git::{BlameService, GitInvoker};
use crate::models::ServiceState;

pub fn routes<G: GitInvoker>(service: Arc<BlameService<G>>) -> Router {
    Router::new()
        .route("/api/v1/service", get(get_state::<G>))
        .route("/api/v1/service/toggle", post(toggle::<G>))
        .with_state(service)
}

async fn get_state<G: GitInvoker>(
    State(service): State<Arc<BlameService<G>>>,
) -> Result<Json<ServiceState>> {
    Ok(Json(ServiceState {
        enabled: service.enabled(),
    }))
}

async fn toggle<G: GitInvoker>(
    State(service): State<Arc<BlameService<G>>>,
) -> Result<Json<ServiceState>> {
    Ok(Json(ServiceState {
        enabled: service.toggle(),
    }))
}
