//! Proposal endpoints. All of them require authentication.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::proposals::model::{
    CreateProposalRequest, ProposalListParams, ProposalResponse, ProposalStatusResponse,
    UpdateProposalStatusRequest,
};
use crate::state::AppState;

/// POST /api/proposals
pub async fn create_proposal(
    State(state): State<AppState>,
    principal: AuthenticatedUser,
    payload: Result<Json<CreateProposalRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProposalResponse>)> {
    let Json(req) = payload?;
    let proposal = state.proposals.create(&principal, req).await?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

/// PATCH /api/proposals/:id
pub async fn update_proposal_status(
    State(state): State<AppState>,
    principal: AuthenticatedUser,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateProposalStatusRequest>, JsonRejection>,
) -> ApiResult<Json<ProposalStatusResponse>> {
    let Json(req) = payload?;
    Ok(Json(
        state.proposals.update_status(&principal, id, req).await?,
    ))
}

/// GET /api/my-proposals
pub async fn list_my_proposals(
    State(state): State<AppState>,
    principal: AuthenticatedUser,
    Query(params): Query<ProposalListParams>,
) -> ApiResult<Json<Vec<ProposalResponse>>> {
    Ok(Json(
        state.proposals.list_for_user(&principal, params).await?,
    ))
}
