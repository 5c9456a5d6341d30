use axum::{
    extract::{Path, Query, State},
    Json,
};
use types::Order;

use crate::auth::WalletUser;
use crate::error::ApiError;
use crate::models::{
    OrderBookResponse, OutcomeQuery, PlaceOrderRequest, PlaceOrderResponse, StatusQuery,
};
use crate::state::AppState;
use crate::{store, trading};

pub async fn place_order(
    State(state): State<AppState>,
    user: WalletUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let (order, trades) = trading::place_order(&state, &user.address, req).await?;
    Ok(Json(PlaceOrderResponse { order, trades }))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    user: WalletUser,
    Path(order_id): Path<i64>,
) -> Result<Json<Order>, ApiError> {
    let order = trading::cancel_order(&state, &user.address, order_id).await?;
    Ok(Json(order))
}

pub async fn get_user_orders(
    State(state): State<AppState>,
    user: WalletUser,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders =
        store::orders::list_user_orders(&state.pool, &user.address, query.status.as_deref())
            .await?;
    Ok(Json(orders))
}

pub async fn get_order_book(
    State(state): State<AppState>,
    Path(market_id): Path<i64>,
    Query(query): Query<OutcomeQuery>,
) -> Result<Json<OrderBookResponse>, ApiError> {
    let outcome = query.outcome.unwrap_or(1);

    let response = match state.books.snapshot_depth(market_id, outcome).await {
        Some(depth) => depth.into(),
        None => OrderBookResponse::empty(),
    };
    Ok(Json(response))
}
