//! Single-instrument limit order book.
//!
//! ## Architecture
//!
//! - **Slab**: the one owner of every resting order (arena)
//! - **SideIndex**: sorted price levels per side, best level first
//! - **HashMap**: order ID to slab key mapping for O(1) lookup and cancel
//!
//! The id index and the level queues store slab keys only. Every mutation
//! updates both in the same call, and every fallible call validates before
//! it mutates, so a failed call leaves the book untouched.
//!
//! ## Matching Policy
//!
//! With [`MatchMode::OnDemand`] (the default) nothing trades until
//! [`OrderBook::run_matching`] is called, so a crossed book is observable
//! in between. [`MatchMode::Continuous`] matches after every admission and
//! every price or side amendment.
//!
//! ## Example
//!
//! ```
//! use limit_book::OrderBook;
//! use limit_book::types::{Order, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::with_capacity(16);
//! book.add_order(Order::new("B1", Side::Buy, Decimal::from(100), Decimal::from(10), 0)).unwrap();
//! book.add_order(Order::new("S1", Side::Sell, Decimal::from(105), Decimal::from(5), 0)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(Decimal::from(100)));
//! assert_eq!(book.best_ask(), Some(Decimal::from(105)));
//! assert_eq!(book.mid_price(), Some(Decimal::new(1025, 1)));
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, trace, warn};

use crate::config::{BookConfig, MatchMode};
use crate::error::{BookError, InvariantViolation, Result};
use crate::orderbook::side_index::{AskIndex, BidIndex, PriceOrdering, SideIndex};
use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::price::{format_decimal, midpoint, validate_price, validate_quantity};
use crate::types::{Order, OrderId, Side, Trade};

/// Aggregate view of one price level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub price: Decimal,
    pub total_quantity: Decimal,
    pub order_count: usize,
}

impl From<&PriceLevel> for LevelSummary {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price,
            total_quantity: level.total_quantity,
            order_count: level.order_count,
        }
    }
}

/// Limit order book for a single instrument
#[derive(Debug)]
pub struct OrderBook {
    /// Arena of resting orders
    pub(crate) orders: Slab<OrderNode>,

    /// Bid price levels (highest first)
    pub(crate) bids: BidIndex,

    /// Ask price levels (lowest first)
    pub(crate) asks: AskIndex,

    /// Order ID to slab key mapping
    pub(crate) order_index: HashMap<OrderId, usize>,

    /// Price of the most recent trade
    pub(crate) last_traded_price: Option<Decimal>,

    /// Next trade ID
    pub(crate) next_trade_id: u64,

    /// Trades executed since the last `take_trades`
    pub(crate) executions: Vec<Trade>,

    bid_count: usize,
    ask_count: usize,
    match_mode: MatchMode,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book with the default configuration
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create an empty book with pre-allocated order capacity
    ///
    /// ```
    /// use limit_book::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(BookConfig::default().order_capacity(order_capacity))
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            bids: SideIndex::new(),
            asks: SideIndex::new(),
            order_index: HashMap::with_capacity(config.order_capacity),
            last_traded_price: None,
            next_trade_id: 1,
            executions: Vec::new(),
            bid_count: 0,
            ask_count: 0,
            match_mode: config.match_mode,
        }
    }

    #[inline]
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Switch matching policy. Switching to `Continuous` does not match
    /// an already crossed book; call `run_matching` for that.
    pub fn set_match_mode(&mut self, match_mode: MatchMode) {
        self.match_mode = match_mode;
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // Order Admission
    // ========================================================================

    /// Add an order to the back of its price level
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the price is not positive or the quantity is
    ///   not positive
    /// - `InvalidArgument` if the level total at this price would overflow
    /// - `DuplicateOrderId` if an order with the same id is resting
    pub fn add_order(&mut self, order: Order) -> Result<()> {
        validate_price(order.price)?;
        validate_quantity(order.quantity)?;
        if order.quantity.is_zero() {
            return Err(BookError::invalid(format!(
                "order {} has zero quantity",
                order.id
            )));
        }
        if self.order_index.contains_key(&order.id) {
            warn!(order_id = %order.id, "rejected duplicate order id");
            return Err(BookError::DuplicateOrderId { order_id: order.id });
        }
        self.ensure_level_room(order.side, order.price, order.quantity)?;

        debug!(
            order_id = %order.id,
            side = %order.side,
            price = %order.price,
            quantity = %order.quantity,
            "order admitted"
        );

        let order_id = order.id.clone();
        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(order_id, key);
        self.link(key);

        self.match_if_continuous();
        Ok(())
    }

    // ========================================================================
    // Cancellation and Amendment
    // ========================================================================

    /// Cancel a resting order
    ///
    /// # Returns
    ///
    /// The cancelled order with its open quantity
    ///
    /// # Errors
    ///
    /// `NotFound` if no order with this id is resting
    pub fn remove_order(&mut self, order_id: &str) -> Result<Order> {
        let key = self.key_of(order_id)?;
        let order = self.remove_by_key(key);
        debug!(order_id = %order.id, quantity = %order.quantity, "order cancelled");
        Ok(order)
    }

    /// Move an order to a new price. It joins the back of the new level.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `new_price` is not positive, or the level at
    ///   `new_price` cannot absorb the order's quantity
    /// - `NotFound` if no order with this id is resting
    pub fn modify_price(&mut self, order_id: &str, new_price: Decimal) -> Result<()> {
        validate_price(new_price)?;
        let key = self.key_of(order_id)?;
        let node = &self.orders[key];
        if node.price() != new_price {
            self.ensure_level_room(node.side(), new_price, node.quantity())?;
        }

        self.unlink(key);
        self.orders[key].order.price = new_price;
        self.link(key);

        debug!(order_id, price = %new_price, "order repriced");
        self.match_if_continuous();
        Ok(())
    }

    /// Move an order to the other side (or re-queue it on its own side).
    /// It joins the back of the level at its price.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no order with this id is resting
    /// - `InvalidArgument` if the level on `new_side` cannot absorb the
    ///   order's quantity
    pub fn modify_side(&mut self, order_id: &str, new_side: Side) -> Result<()> {
        let key = self.key_of(order_id)?;
        let node = &self.orders[key];
        if node.side() != new_side {
            self.ensure_level_room(new_side, node.price(), node.quantity())?;
        }

        self.unlink(key);
        self.orders[key].order.side = new_side;
        self.link(key);

        debug!(order_id, side = %new_side, "order side changed");
        self.match_if_continuous();
        Ok(())
    }

    /// [`modify_side`](Self::modify_side) taking the side as text
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `new_side` is not "buy"/"sell" ("bid"/"ask")
    /// - `NotFound` if no order with this id is resting
    pub fn modify_side_str(&mut self, order_id: &str, new_side: &str) -> Result<()> {
        let side = new_side.parse::<Side>()?;
        self.modify_side(order_id, side)
    }

    /// Change an order's open quantity in place, keeping its queue position.
    /// A quantity of zero cancels the order.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `new_quantity` is negative, or the increase
    ///   would overflow the level total
    /// - `NotFound` if no order with this id is resting
    pub fn modify_quantity(&mut self, order_id: &str, new_quantity: Decimal) -> Result<()> {
        validate_quantity(new_quantity)?;
        let key = self.key_of(order_id)?;

        if new_quantity.is_zero() {
            self.remove_by_key(key);
            debug!(order_id, "order removed by zero quantity");
            return Ok(());
        }

        let node = &self.orders[key];
        let old_quantity = node.quantity();
        let (side, price) = (node.side(), node.price());
        if new_quantity > old_quantity {
            self.ensure_level_room(side, price, new_quantity - old_quantity)?;
        }
        self.orders[key].order.quantity = new_quantity;

        let level = match side {
            Side::Buy => self.bids.get_mut(price),
            Side::Sell => self.asks.get_mut(price),
        };
        if let Some(level) = level {
            if new_quantity > old_quantity {
                level.increase_quantity(new_quantity - old_quantity);
            } else {
                level.reduce_quantity(old_quantity - new_quantity);
            }
        }

        debug!(order_id, quantity = %new_quantity, "order quantity changed");
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get_order(&self, order_id: &str) -> Option<&Order> {
        let key = *self.order_index.get(order_id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    #[inline]
    pub fn contains_order(&self, order_id: &str) -> bool {
        self.order_index.contains_key(order_id)
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// Highest resting buy price
    pub fn best_bid(&self) -> Option<Decimal> {
        let best = self.bids.best_price();
        trace!(best_bid = ?best);
        best
    }

    /// Lowest resting sell price
    pub fn best_ask(&self) -> Option<Decimal> {
        let best = self.asks.best_price();
        trace!(best_ask = ?best);
        best
    }

    /// best_ask - best_bid; negative while an on-demand book is crossed
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Mean of best bid and best ask, when both exist
    pub fn mid_price(&self) -> Option<Decimal> {
        let mid = match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(midpoint(bid, ask)),
            _ => None,
        };
        trace!(mid_price = ?mid);
        mid
    }

    /// Price of the most recent trade, if any trade has happened
    #[inline]
    pub fn last_traded_price(&self) -> Option<Decimal> {
        self.last_traded_price
    }

    /// Last traded price, else mid price, else unavailable
    pub fn current_market_price(&self) -> Option<Decimal> {
        self.last_traded_price.or_else(|| self.mid_price())
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Levels of one side, best first
    pub fn levels(&self, side: Side) -> Vec<LevelSummary> {
        match side {
            Side::Buy => self.bids.iter().map(LevelSummary::from).collect(),
            Side::Sell => self.asks.iter().map(LevelSummary::from).collect(),
        }
    }

    /// Every resting order of one side: best price first, oldest first
    /// within a price
    pub fn orders(&self, side: Side) -> Vec<&Order> {
        match side {
            Side::Buy => self.side_orders(&self.bids),
            Side::Sell => self.side_orders(&self.asks),
        }
    }

    fn side_orders<O: PriceOrdering>(&self, index: &SideIndex<O>) -> Vec<&Order> {
        index
            .iter()
            .flat_map(|level| level.iter(&self.orders).map(|(_, order)| order))
            .collect()
    }

    /// Trades executed so far that have not been taken
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.executions
    }

    /// Drain the execution journal
    pub fn take_trades(&mut self) -> Vec<Trade> {
        std::mem::take(&mut self.executions)
    }

    /// SHA-256 over both sides in best-first order and the last traded price.
    ///
    /// Two books with the same resting orders in the same queue positions
    /// produce the same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for side in [Side::Buy, Side::Sell] {
            hasher.update(side.as_str().as_bytes());
            for order in self.orders(side) {
                hasher.update([0u8]);
                hasher.update(order.id.as_str().as_bytes());
                hasher.update([0u8]);
                hasher.update(format_decimal(order.price).as_bytes());
                hasher.update([0u8]);
                hasher.update(format_decimal(order.quantity).as_bytes());
            }
            hasher.update([0xffu8]);
        }
        if let Some(price) = self.last_traded_price {
            hasher.update(format_decimal(price).as_bytes());
        }
        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }

    /// Clear all resting orders. The last traded price is kept.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.order_index.clear();
        self.bid_count = 0;
        self.ask_count = 0;
    }

    /// Audit every structural invariant of the book
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        let linked = self.audit_side(&self.bids)? + self.audit_side(&self.asks)?;
        let indexed = self.order_index.len();
        if linked != indexed || indexed != self.orders.len() {
            return Err(InvariantViolation::IndexMismatch { indexed, linked });
        }
        if self.bids.iter().map(|l| l.order_count).sum::<usize>() != self.bid_count
            || self.asks.iter().map(|l| l.order_count).sum::<usize>() != self.ask_count
        {
            return Err(InvariantViolation::IndexMismatch { indexed, linked });
        }
        Ok(())
    }

    fn audit_side<O: PriceOrdering>(
        &self,
        index: &SideIndex<O>,
    ) -> std::result::Result<usize, InvariantViolation> {
        let side = index.side();
        let mut linked = 0;
        let mut prev_price: Option<Decimal> = None;

        for level in index.iter() {
            if level.is_empty() || level.head.is_none() {
                return Err(InvariantViolation::EmptyLevel { side, price: level.price });
            }
            if let Some(prev) = prev_price {
                if !index.is_better(prev, level.price) {
                    return Err(InvariantViolation::Ordering {
                        side,
                        prev,
                        next: level.price,
                    });
                }
            }
            prev_price = Some(level.price);

            let mut total = Decimal::ZERO;
            let mut count = 0;
            for (key, order) in level.iter(&self.orders) {
                if order.side != side || order.price != level.price {
                    return Err(InvariantViolation::MisplacedOrder {
                        order_id: order.id.clone(),
                        side,
                        level_price: level.price,
                        order_side: order.side,
                        order_price: order.price,
                    });
                }
                if order.quantity <= Decimal::ZERO {
                    return Err(InvariantViolation::NonPositiveQuantity {
                        order_id: order.id.clone(),
                        quantity: order.quantity,
                    });
                }
                if self.order_index.get(&order.id) != Some(&key) {
                    return Err(InvariantViolation::Unindexed {
                        order_id: order.id.clone(),
                    });
                }
                total += order.quantity;
                count += 1;
            }
            if total != level.total_quantity || count != level.order_count {
                return Err(InvariantViolation::LevelTotals {
                    side,
                    price: level.price,
                    reported: level.total_quantity,
                    actual: total,
                });
            }
            linked += count;
        }
        Ok(linked)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn key_of(&self, order_id: &str) -> Result<usize> {
        match self.order_index.get(order_id) {
            Some(key) => Ok(*key),
            None => {
                warn!(order_id, "order not found");
                Err(BookError::not_found(order_id))
            }
        }
    }

    /// Fail unless the level at (`side`, `price`) can grow by `quantity`
    fn ensure_level_room(&self, side: Side, price: Decimal, quantity: Decimal) -> Result<()> {
        let level = match side {
            Side::Buy => self.bids.get(price),
            Side::Sell => self.asks.get(price),
        };
        match level {
            Some(level) if !level.has_room_for(quantity) => {
                warn!(%side, %price, %quantity, "level total would overflow");
                Err(BookError::invalid(format!(
                    "{side} level at {price} cannot absorb {quantity} more"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Append the slab node at `key` to the level matching its own fields
    fn link(&mut self, key: usize) {
        let (side, price) = {
            let node = &self.orders[key];
            (node.side(), node.price())
        };
        match side {
            Side::Buy => {
                self.bids.push(price, key, &mut self.orders);
                self.bid_count += 1;
            }
            Side::Sell => {
                self.asks.push(price, key, &mut self.orders);
                self.ask_count += 1;
            }
        }
    }

    /// Detach the slab node at `key` from its level; the id index is untouched
    fn unlink(&mut self, key: usize) {
        let (side, price) = {
            let node = &self.orders[key];
            (node.side(), node.price())
        };
        match side {
            Side::Buy => {
                if self.bids.unlink(price, key, &mut self.orders).is_some() {
                    self.bid_count -= 1;
                }
            }
            Side::Sell => {
                if self.asks.unlink(price, key, &mut self.orders).is_some() {
                    self.ask_count -= 1;
                }
            }
        }
    }

    /// Unlink, unindex and free an order
    pub(crate) fn remove_by_key(&mut self, key: usize) -> Order {
        self.unlink(key);
        let order = self.orders.remove(key).order;
        self.order_index.remove(&order.id);
        order
    }

    pub(crate) fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    fn match_if_continuous(&mut self) {
        if self.match_mode == MatchMode::Continuous {
            self.run_matching();
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
