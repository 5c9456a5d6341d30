//! Placement and cancellation coordinators
//!
//! The only code that crosses the in-memory/durable boundary. Each
//! request runs one database transaction with the book lock nested
//! inside it; the commit happens while the lock is still held, so depth
//! snapshots never observe a match that later rolls back. On a durable
//! failure the book is restored from a checkpoint taken before the
//! mutation, then the transaction rolls back.

use matching_engine::MatchResult;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use types::{BalanceChange, MarketStatus, Order, OrderStatus, Price, Quantity, Side, Trade};

use crate::error::ApiError;
use crate::models::PlaceOrderRequest;
use crate::state::AppState;
use crate::store;

/// Validated order parameters out of a raw request
pub fn parse_request(req: &PlaceOrderRequest) -> Result<(Side, Price, Quantity), ApiError> {
    let side = Side::parse(&req.side).ok_or(ApiError::InvalidSide)?;

    let min = Decimal::new(1, 2); // 0.01
    let max = Decimal::new(99, 2); // 0.99
    if req.price < min || req.price > max {
        return Err(ApiError::InvalidPrice);
    }
    let price = Price::try_new(req.price).ok_or(ApiError::InvalidPrice)?;

    if req.quantity <= Decimal::ZERO {
        return Err(ApiError::InvalidQuantity);
    }
    let quantity = Quantity::try_new(req.quantity).ok_or(ApiError::InvalidQuantity)?;

    Ok((side, price, quantity))
}

/// Place a limit order: validate, lock collateral, match, persist.
pub async fn place_order(
    state: &AppState,
    user_address: &str,
    req: PlaceOrderRequest,
) -> Result<(Order, Vec<Trade>), ApiError> {
    let (side, price, quantity) = parse_request(&req)?;

    let market = store::markets::get_market(&state.pool, req.market_id)
        .await?
        .ok_or(ApiError::MarketNotFound)?;
    if market.status != MarketStatus::Active {
        return Err(ApiError::MarketNotActive);
    }
    if !market.has_outcome(req.outcome) {
        return Err(ApiError::InvalidOutcome);
    }

    // buys reserve price x quantity of collateral; sells are covered by
    // outcome tokens escrowed outside this service
    let required = quantity.notional(price);
    if side == Side::Buy {
        let balance = store::balances::get_balance(&state.pool, user_address)
            .await?
            .ok_or(ApiError::InsufficientBalance)?;
        if !balance.can_cover(required) {
            return Err(ApiError::InsufficientBalance);
        }
    }

    let mut order = Order::new(req.market_id, user_address, req.outcome, side, price, quantity);

    let mut tx = state.pool.begin().await?;

    // the conditional update re-checks funds atomically; a concurrent
    // order may have drained them since the pre-check above
    let mut available_after = None;
    if side == Side::Buy {
        available_after = store::balances::lock_collateral(&mut tx, user_address, required).await?;
        if available_after.is_none() {
            return Err(ApiError::InsufficientBalance);
        }
    }

    let (id, created_at, updated_at) = store::orders::insert_order(&mut tx, &order).await?;
    order.id = id;
    order.created_at = created_at;
    order.updated_at = updated_at;

    if let Some(balance_after) = available_after {
        store::balances::insert_balance_log(
            &mut tx,
            user_address,
            BalanceChange::Lock,
            required,
            balance_after,
            Some(order.id),
        )
        .await?;
    }

    let book_ref = state.books.get_or_create(req.market_id, req.outcome).await;
    let mut book = book_ref.lock().await;
    let checkpoint = (*book).clone();

    let mut result = book.add_order(order);

    match persist_match(tx, &mut result).await {
        Ok(()) => {}
        Err(err) => {
            // the transaction is gone; undo the in-memory mutation too
            *book = checkpoint;
            return Err(err);
        }
    }
    drop(book);

    if !result.trades.is_empty() {
        tracing::info!(
            order_id = result.taker.id,
            market_id = req.market_id,
            outcome = req.outcome,
            trades = result.trades.len(),
            "order matched"
        );
    }

    Ok((result.taker, result.trades))
}

/// Persist everything a match produced, then commit.
///
/// Takes the transaction by value: any error drops it, which rolls the
/// whole placement back.
async fn persist_match(
    mut tx: Transaction<'_, Postgres>,
    result: &mut MatchResult,
) -> Result<(), ApiError> {
    for trade in &mut result.trades {
        let (id, created_at) = store::trades::insert_trade(&mut tx, trade).await?;
        trade.id = id;
        trade.created_at = created_at;
    }

    for maker in &result.maker_orders {
        store::orders::update_fill(&mut tx, maker.id, maker.filled_quantity, maker.status).await?;
    }

    store::orders::update_fill(
        &mut tx,
        result.taker.id,
        result.taker.filled_quantity,
        result.taker.status,
    )
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Cancel a resting order and release its collateral.
pub async fn cancel_order(
    state: &AppState,
    user_address: &str,
    order_id: i64,
) -> Result<Order, ApiError> {
    let mut order = store::orders::get_order(&state.pool, order_id)
        .await?
        .ok_or(ApiError::OrderNotFound)?;

    if !order.user_address.eq_ignore_ascii_case(user_address) {
        return Err(ApiError::Forbidden);
    }
    if !order.is_cancellable() {
        return Err(ApiError::NotCancellable);
    }

    // remove() leaves remaining untouched, so the unlock amount can be
    // computed up front
    let unlock = order.remaining().notional(order.price);

    let tx = state.pool.begin().await?;

    let book_ref = state
        .books
        .get_or_create(order.market_id, order.outcome)
        .await;
    let mut book = book_ref.lock().await;
    let checkpoint = (*book).clone();

    // absence is not an error: cancellation stays idempotent at the
    // book level even if the entry is already gone
    let removed = book.remove_order(&order);
    if !removed {
        tracing::warn!(order_id, "cancel: order not resting in book");
    }

    match persist_cancel(tx, &order, unlock).await {
        Ok(()) => {}
        Err(err) => {
            *book = checkpoint;
            return Err(err);
        }
    }
    drop(book);

    order.status = OrderStatus::Cancelled;
    Ok(order)
}

async fn persist_cancel(
    mut tx: Transaction<'_, Postgres>,
    order: &Order,
    unlock: Decimal,
) -> Result<(), ApiError> {
    if order.side == Side::Buy && unlock > Decimal::ZERO {
        let available_after =
            store::balances::unlock_collateral(&mut tx, &order.user_address, unlock)
                .await?
                .ok_or_else(|| {
                    ApiError::Internal(anyhow::anyhow!(
                        "balance row missing for {}",
                        order.user_address
                    ))
                })?;

        store::balances::insert_balance_log(
            &mut tx,
            &order.user_address,
            BalanceChange::Unlock,
            unlock,
            available_after,
            Some(order.id),
        )
        .await?;
    }

    store::orders::mark_cancelled(&mut tx, order.id).await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn request(side: &str, price: &str, quantity: &str) -> PlaceOrderRequest {
        PlaceOrderRequest {
            market_id: 1,
            outcome: 1,
            side: side.to_string(),
            price: Decimal::from_str(price).unwrap(),
            quantity: Decimal::from_str(quantity).unwrap(),
        }
    }

    #[test]
    fn test_parse_request_valid() {
        let (side, price, quantity) = parse_request(&request("buy", "0.40", "10")).unwrap();
        assert_eq!(side, Side::Buy);
        assert_eq!(price, Price::from_str("0.40").unwrap());
        assert_eq!(quantity, Quantity::from_str("10").unwrap());
    }

    #[test]
    fn test_parse_request_rejects_bad_side() {
        assert!(matches!(
            parse_request(&request("hold", "0.40", "10")),
            Err(ApiError::InvalidSide)
        ));
    }

    #[test]
    fn test_parse_request_price_band() {
        // boundaries are inclusive
        assert!(parse_request(&request("buy", "0.01", "10")).is_ok());
        assert!(parse_request(&request("buy", "0.99", "10")).is_ok());

        assert!(matches!(
            parse_request(&request("buy", "0.009", "10")),
            Err(ApiError::InvalidPrice)
        ));
        assert!(matches!(
            parse_request(&request("buy", "0.991", "10")),
            Err(ApiError::InvalidPrice)
        ));
        assert!(matches!(
            parse_request(&request("buy", "-0.5", "10")),
            Err(ApiError::InvalidPrice)
        ));
    }

    #[test]
    fn test_parse_request_rejects_non_positive_quantity() {
        assert!(matches!(
            parse_request(&request("sell", "0.40", "0")),
            Err(ApiError::InvalidQuantity)
        ));
        assert!(matches!(
            parse_request(&request("sell", "0.40", "-1")),
            Err(ApiError::InvalidQuantity)
        ));
    }

    #[test]
    fn test_buy_collateral_requirement() {
        // scenario: buy 100 at 0.50 locks 50
        let (_, price, quantity) = parse_request(&request("buy", "0.50", "100")).unwrap();
        assert_eq!(quantity.notional(price), Decimal::from(50));
    }

    #[test]
    fn test_unlock_amount_tracks_remaining() {
        let mut order = Order::new(
            1,
            "0x00000000000000000000000000000000000000aa",
            1,
            Side::Buy,
            Price::from_str("0.50").unwrap(),
            Quantity::from_str("100").unwrap(),
        );

        // untouched order unlocks the full lock
        assert_eq!(
            order.remaining().notional(order.price),
            Decimal::from(50)
        );

        // after a partial fill only the resting remainder unlocks
        order.apply_fill(Quantity::from_str("40").unwrap());
        assert_eq!(
            order.remaining().notional(order.price),
            Decimal::from(30)
        );
    }
}
