use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use types::{Market, MarketStatus};

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::models::{CreateMarketRequest, ResolveMarketRequest};
use crate::state::AppState;
use crate::store;

pub async fn create_market(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateMarketRequest>,
) -> Result<(StatusCode, Json<Market>), ApiError> {
    if req.question.trim().is_empty() {
        return Err(ApiError::BadRequest("question is required".to_string()));
    }
    if req.outcomes.len() < 2 {
        return Err(ApiError::BadRequest(
            "market needs at least two outcomes".to_string(),
        ));
    }
    if req.end_time <= Utc::now() {
        return Err(ApiError::BadRequest(
            "end time must be in the future".to_string(),
        ));
    }
    if req.resolution_time < req.end_time {
        return Err(ApiError::BadRequest(
            "resolution time must be after end time".to_string(),
        ));
    }

    let market = store::markets::insert_market(
        &state.pool,
        req.question.trim(),
        &req.description,
        &req.outcomes,
        req.end_time,
        req.resolution_time,
    )
    .await?;

    tracing::info!(market_id = market.id, "market created");
    Ok((StatusCode::CREATED, Json(market)))
}

pub async fn resolve_market(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(market_id): Path<i64>,
    Json(req): Json<ResolveMarketRequest>,
) -> Result<Json<Market>, ApiError> {
    let market = store::markets::get_market(&state.pool, market_id)
        .await?
        .ok_or(ApiError::MarketNotFound)?;

    if market.status != MarketStatus::Active {
        return Err(ApiError::MarketNotActive);
    }
    if !market.has_outcome(req.outcome) {
        return Err(ApiError::InvalidOutcome);
    }

    let market = store::markets::resolve_market(&state.pool, market_id, req.outcome).await?;

    tracing::info!(market_id, outcome = req.outcome, "market resolved");
    Ok(Json(market))
}
