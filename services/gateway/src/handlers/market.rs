use axum::{
    extract::{Path, Query, State},
    Json,
};
use types::{Market, Trade};

use crate::error::ApiError;
use crate::models::StatusQuery;
use crate::state::AppState;
use crate::store;

pub async fn list_markets(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Market>>, ApiError> {
    let markets = store::markets::list_markets(&state.pool, query.status.as_deref()).await?;
    Ok(Json(markets))
}

pub async fn get_market(
    State(state): State<AppState>,
    Path(market_id): Path<i64>,
) -> Result<Json<Market>, ApiError> {
    let market = store::markets::get_market(&state.pool, market_id)
        .await?
        .ok_or(ApiError::MarketNotFound)?;
    Ok(Json(market))
}

pub async fn get_market_trades(
    State(state): State<AppState>,
    Path(market_id): Path<i64>,
) -> Result<Json<Vec<Trade>>, ApiError> {
    let trades = store::trades::list_market_trades(&state.pool, market_id).await?;
    Ok(Json(trades))
}
