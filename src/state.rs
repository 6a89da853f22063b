//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::ads::AdService;
use crate::auth::TokenVerifier;
use crate::proposals::ProposalService;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub ads: Arc<AdService>,
    pub proposals: Arc<ProposalService>,
    pub token_verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db_pool: PgPool, jwt_secret: String) -> Self {
        Self {
            ads: Arc::new(AdService::new(db_pool.clone())),
            proposals: Arc::new(ProposalService::new(db_pool.clone())),
            token_verifier: Arc::new(TokenVerifier::new(jwt_secret)),
            db_pool,
        }
    }
}

// Lets the auth extractor pull the verifier out of any router using AppState.
impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.token_verifier.clone()
    }
}
