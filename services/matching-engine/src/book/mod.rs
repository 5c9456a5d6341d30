//! Order book for a single (market, outcome) pair
//!
//! Owns both sides and the matching loop. Incoming orders consume
//! opposite-side liquidity under price-time priority: levels best price
//! first, FIFO within a level, every trade at the maker's resting
//! price. Whatever is left over rests on the order's own side.

mod ask_book;
mod bid_book;
mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;

use types::{Order, Price, Quantity, Side, Trade};

/// Everything a single `add_order` call produced
///
/// `taker` is the incoming order after matching; `maker_orders` are
/// snapshots of every resting order whose fill or status changed, in
/// fill order. All of it must reach the store in one transaction.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub trades: Vec<Trade>,
    pub maker_orders: Vec<Order>,
    pub taker: Order,
}

/// Limit order book scoped to one (market, outcome) pair
#[derive(Debug, Clone)]
pub struct OrderBook {
    market_id: i64,
    outcome: i16,
    bids: BidBook,
    asks: AskBook,
}

impl OrderBook {
    pub fn new(market_id: i64, outcome: i16) -> Self {
        Self {
            market_id,
            outcome,
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    pub fn market_id(&self) -> i64 {
        self.market_id
    }

    pub fn outcome(&self) -> i16 {
        self.outcome
    }

    /// Match an incoming order and rest any unfilled remainder
    pub fn add_order(&mut self, mut taker: Order) -> MatchResult {
        let mut trades = Vec::new();
        let mut maker_orders = Vec::new();

        match taker.side {
            Side::Buy => self.match_against_asks(&mut taker, &mut trades, &mut maker_orders),
            Side::Sell => self.match_against_bids(&mut taker, &mut trades, &mut maker_orders),
        }

        if !taker.remaining().is_zero() {
            self.insert_resting(taker.clone());
        }

        MatchResult {
            trades,
            maker_orders,
            taker,
        }
    }

    /// Remove a resting order; true if it was present
    pub fn remove_order(&mut self, order: &Order) -> bool {
        match order.side {
            Side::Buy => self.bids.remove(order.id, order.price),
            Side::Sell => self.asks.remove(order.id, order.price),
        }
    }

    /// Rest an order on its own side without matching
    ///
    /// Used for unfilled remainders and for rebuilding the book from
    /// persisted open orders at startup.
    pub fn insert_resting(&mut self, order: Order) {
        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    /// Aggregated depth per side, best price first
    pub fn depth(&self) -> (Vec<(Price, Quantity)>, Vec<(Price, Quantity)>) {
        (self.bids.depth(), self.asks.depth())
    }

    /// Best bid price, if any buy liquidity rests
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Best ask price, if any sell liquidity rests
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    fn match_against_asks(
        &mut self,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
        maker_orders: &mut Vec<Order>,
    ) {
        while !taker.remaining().is_zero() {
            let Some((level_price, level)) = self.asks.best_level_mut() else {
                break;
            };
            // a buy crosses while its price is at or above the ask
            if taker.price < level_price {
                break;
            }

            Self::consume_level(level, taker, trades, maker_orders);

            let emptied = level.is_empty();
            if emptied {
                self.asks.prune(level_price);
            }
        }
    }

    fn match_against_bids(
        &mut self,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
        maker_orders: &mut Vec<Order>,
    ) {
        while !taker.remaining().is_zero() {
            let Some((level_price, level)) = self.bids.best_level_mut() else {
                break;
            };
            // a sell crosses while its price is at or below the bid
            if taker.price > level_price {
                break;
            }

            Self::consume_level(level, taker, trades, maker_orders);

            let emptied = level.is_empty();
            if emptied {
                self.bids.prune(level_price);
            }
        }
    }

    /// Fill the taker against one level, oldest maker first
    fn consume_level(
        level: &mut PriceLevel,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
        maker_orders: &mut Vec<Order>,
    ) {
        loop {
            if taker.remaining().is_zero() {
                break;
            }
            let Some(maker) = level.front_mut() else {
                break;
            };

            let quantity = taker.remaining().min(maker.remaining());
            let trade = Trade::from_match(maker, taker, quantity);

            maker.apply_fill(quantity);
            let maker_done = maker.remaining().is_zero();
            maker_orders.push(maker.clone());

            taker.apply_fill(quantity);
            trades.push(trade);
            level.reduce(quantity);

            if maker_done {
                level.pop_front();
            }
        }
    }
}
