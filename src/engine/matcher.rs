//! Crossing loop: trades the best bid against the best ask until the book
//! is no longer crossed.
//!
//! ## Per Iteration
//!
//! 1. Stop if either side is empty or best bid < best ask
//! 2. Take the oldest order at the best bid and the oldest at the best ask
//! 3. Trade min(open quantities) at the sell order's price
//! 4. Retire whichever order (or both) reached zero
//!
//! Every iteration retires at least one order, so the loop ends after at
//! most `order_count` iterations.

use rust_decimal::Decimal;
use tracing::info;

use crate::orderbook::OrderBook;
use crate::types::Trade;

/// Trades produced by one `run_matching` pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Trades in execution order
    pub trades: Vec<Trade>,
}

impl MatchResult {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Sum of traded quantity
    pub fn total_quantity(&self) -> Decimal {
        self.trades
            .iter()
            .fold(Decimal::ZERO, |total, t| total.saturating_add(t.quantity))
    }

    /// Price of the final trade in this pass
    pub fn last_price(&self) -> Option<Decimal> {
        self.trades.last().map(|t| t.price)
    }
}

impl OrderBook {
    /// Match crossing interest until best bid < best ask or a side is empty.
    ///
    /// Trades are returned and also appended to the execution journal
    /// (see [`OrderBook::take_trades`]).
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::OrderBook;
    /// use limit_book::types::{Order, Side};
    /// use rust_decimal::Decimal;
    ///
    /// let mut book = OrderBook::new();
    /// book.add_order(Order::new("S1", Side::Sell, Decimal::from(99), Decimal::from(8), 0)).unwrap();
    /// book.add_order(Order::new("B1", Side::Buy, Decimal::from(102), Decimal::from(7), 0)).unwrap();
    ///
    /// let result = book.run_matching();
    /// assert_eq!(result.trades.len(), 1);
    /// assert_eq!(result.trades[0].price, Decimal::from(99));
    /// assert_eq!(book.get_order("S1").map(|o| o.quantity), Some(Decimal::ONE));
    /// ```
    pub fn run_matching(&mut self) -> MatchResult {
        let mut trades = Vec::new();

        loop {
            let (bid_key, ask_key) = {
                let (Some(bid_level), Some(ask_level)) = (self.bids.best(), self.asks.best()) else {
                    break;
                };
                if bid_level.price < ask_level.price {
                    break;
                }
                match (bid_level.peek_head(), ask_level.peek_head()) {
                    (Some(bid_key), Some(ask_key)) => (bid_key, ask_key),
                    _ => break,
                }
            };

            let price = self.orders[ask_key].price();
            let quantity = self.orders[bid_key].quantity().min(self.orders[ask_key].quantity());

            self.orders[bid_key].fill(quantity);
            self.orders[ask_key].fill(quantity);
            if let Some(level) = self.bids.best_mut() {
                level.reduce_quantity(quantity);
            }
            if let Some(level) = self.asks.best_mut() {
                level.reduce_quantity(quantity);
            }

            let trade = Trade::new(
                self.next_trade_id(),
                self.orders[bid_key].order_id().clone(),
                self.orders[ask_key].order_id().clone(),
                price,
                quantity,
            );
            self.last_traded_price = Some(price);

            info!(
                trade_id = trade.id,
                buy_order_id = %trade.buy_order_id,
                sell_order_id = %trade.sell_order_id,
                price = %price,
                quantity = %quantity,
                "trade executed"
            );

            if self.orders[bid_key].is_filled() {
                self.remove_by_key(bid_key);
            }
            if self.orders[ask_key].is_filled() {
                self.remove_by_key(ask_key);
            }

            trades.push(trade);
        }

        self.executions.extend(trades.iter().cloned());
        MatchResult { trades }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
