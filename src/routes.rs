//! Route table. [`build_router`] assembles the full application and is also
//! the entry point the integration tests drive requests through.

use axum::routing::get;
use axum::Router;

use crate::admin::{admin_router, AdminRegistry};
use crate::handlers;
use crate::middleware::{request_tracing, security_headers};
use crate::state::AppState;

pub fn ad_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/ads",
            get(handlers::list_ads).post(handlers::create_ad),
        )
        .route(
            "/api/ads/:id",
            get(handlers::get_ad)
                .patch(handlers::update_ad)
                .delete(handlers::delete_ad),
        )
}

pub fn proposal_routes() -> Router<AppState> {
    Router::new()
        .route("/api/proposals", axum::routing::post(handlers::create_proposal))
        .route(
            "/api/proposals/:id",
            axum::routing::patch(handlers::update_proposal_status),
        )
        .route("/api/my-proposals", get(handlers::list_my_proposals))
}

pub fn build_router(state: AppState, registry: AdminRegistry) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(ad_routes())
        .merge(proposal_routes())
        .merge(admin_router(registry))
        .with_state(state)
        .layer(axum::middleware::from_fn(security_headers))
        .layer(axum::middleware::from_fn(request_tracing))
}
