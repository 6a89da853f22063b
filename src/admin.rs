//! Administrative overview of managed entities.
//!
//! Entities are registered explicitly at startup and the registry is handed
//! to [`admin_router`]; nothing registers itself as an import side effect.
//! The single endpoint reports per-entity row counts over the unfiltered
//! tables, so soft-deleted listings are included.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;

/// One administered entity.
#[derive(Debug, Clone)]
pub struct EntityAdmin {
    pub slug: &'static str,
    pub verbose_name: &'static str,
    /// Table the row count is taken from. Always a static registry value,
    /// never request input.
    pub table: &'static str,
}

/// Explicitly-constructed registry of administered entities.
#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    empty_value_display: &'static str,
    entities: Vec<EntityAdmin>,
}

impl AdminRegistry {
    pub fn new(empty_value_display: &'static str) -> Self {
        Self {
            empty_value_display,
            entities: Vec::new(),
        }
    }

    pub fn register(mut self, entity: EntityAdmin) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn entities(&self) -> &[EntityAdmin] {
        &self.entities
    }

    pub fn empty_value_display(&self) -> &'static str {
        self.empty_value_display
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminEntityEntry {
    pub slug: String,
    pub verbose_name: String,
    pub total_rows: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminIndexResponse {
    pub empty_value_display: String,
    pub entities: Vec<AdminEntityEntry>,
}

pub fn admin_router(registry: AdminRegistry) -> Router<AppState> {
    Router::new()
        .route("/api/admin/entities", get(list_entities))
        .layer(Extension(Arc::new(registry)))
}

async fn list_entities(
    State(state): State<AppState>,
    Extension(registry): Extension<Arc<AdminRegistry>>,
    _principal: AuthenticatedUser,
) -> ApiResult<Json<AdminIndexResponse>> {
    let mut entities = Vec::with_capacity(registry.entities().len());

    for entity in registry.entities() {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", entity.table))
            .fetch_one(&state.db_pool)
            .await?;

        entities.push(AdminEntityEntry {
            slug: entity.slug.to_string(),
            verbose_name: entity.verbose_name.to_string(),
            total_rows: count,
        });
    }

    Ok(Json(AdminIndexResponse {
        empty_value_display: registry.empty_value_display().to_string(),
        entities,
    }))
}
