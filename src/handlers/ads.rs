//! Listing endpoints.
//!
//! Reads are public; writes require a bearer token. Malformed JSON bodies
//! are reported as 400 with the error envelope rather than axum's default
//! rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::ads::model::{AdListParams, AdResponse, CreateAdRequest, UpdateAdRequest};
use crate::ads::validation;
use crate::error::ApiResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::state::AppState;

/// GET /api/ads
pub async fn list_ads(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<AdListParams>,
) -> ApiResult<Json<Paginated<AdResponse>>> {
    let query = validation::validate_list_params(params)?;
    let (count, results) = state.ads.list(&query).await?;

    Ok(Json(Paginated::new(&uri, query.page, count, results)))
}

/// POST /api/ads
pub async fn create_ad(
    State(state): State<AppState>,
    principal: AuthenticatedUser,
    payload: Result<Json<CreateAdRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AdResponse>)> {
    let Json(req) = payload?;
    let input = validation::validate_new(req)?;
    let ad = state.ads.create(&principal, input).await?;

    Ok((StatusCode::CREATED, Json(ad)))
}

/// GET /api/ads/:id
pub async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AdResponse>> {
    Ok(Json(state.ads.get(id).await?))
}

/// PATCH /api/ads/:id
pub async fn update_ad(
    State(state): State<AppState>,
    principal: AuthenticatedUser,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateAdRequest>, JsonRejection>,
) -> ApiResult<Json<AdResponse>> {
    let Json(req) = payload?;
    Ok(Json(state.ads.update(&principal, id, req).await?))
}

/// DELETE /api/ads/:id
pub async fn delete_ad(
    State(state): State<AppState>,
    principal: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.ads.soft_delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
