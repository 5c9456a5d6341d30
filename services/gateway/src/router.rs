use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, market, order};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/markets", get(market::list_markets))
        .route("/markets/:id", get(market::get_market))
        .route("/markets/:id/trades", get(market::get_market_trades))
        .route("/markets/:id/orderbook", get(order::get_order_book))
        .route("/orders", post(order::place_order))
        .route("/orders/:id", delete(order::cancel_order))
        .route("/user/orders", get(order::get_user_orders));

    let admin_routes = Router::new()
        .route("/markets", post(admin::create_market))
        .route("/markets/:id/resolve", post(admin::resolve_market));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .nest("/api/admin", admin_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
