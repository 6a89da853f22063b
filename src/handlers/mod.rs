//! Request handlers. Each handler extracts and validates the wire input,
//! then delegates to the owning service.

pub mod ads;
pub mod proposals;

pub use ads::{create_ad, delete_ad, get_ad, list_ads, update_ad};
pub use proposals::{create_proposal, list_my_proposals, update_proposal_status};

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// Liveness plus a database round trip.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::check_health(&state.db_pool).await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!("health check failed: {e}");
            "disconnected".to_string()
        }
    };

    let status = if database == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn root() -> &'static str {
    "barter marketplace API"
}
