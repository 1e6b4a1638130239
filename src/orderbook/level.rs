//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all orders at a single price point on one side.
//! Orders are maintained in a doubly-linked list for FIFO ordering
//! (price-time priority).
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be removed in O(1) using the slab key
//!
//! Slab keys handed to a level must be live; a dangling key is a bug in the
//! owning book and panics.

use rust_decimal::Decimal;
use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Order, Side};

/// A price level containing orders at a single price.
///
/// The actual order data lives in the slab; this struct only
/// holds the queue metadata.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level
    pub price: Decimal,

    /// Side every order in this level belongs to
    pub side: Side,

    /// Total open quantity at this level
    pub total_quantity: Decimal,

    /// Head of the order queue (oldest order, slab key)
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Decimal, side: Side) -> Self {
        Self {
            price,
            side,
            total_quantity: Decimal::ZERO,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Whether the level total can grow by `quantity` without overflowing
    #[inline]
    pub fn has_room_for(&self, quantity: Decimal) -> bool {
        self.total_quantity.checked_add(quantity).is_some()
    }

    /// Add an order to the tail of the queue
    ///
    /// This maintains FIFO ordering - oldest orders are matched first.
    /// The caller checks [`has_room_for`](Self::has_room_for) first.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = &mut slab[key];
        let quantity = node.quantity();

        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail_key) => slab[tail_key].next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink an order from the queue by slab key
    ///
    /// Relative order of the remaining orders is preserved.
    ///
    /// # Returns
    ///
    /// The open quantity of the removed order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Decimal {
        let node = &slab[key];
        let quantity = node.quantity();
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => slab[prev].next = next_key,
            None => self.head = next_key,
        }

        match next_key {
            Some(next) => slab[next].prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = &mut slab[key];
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= quantity;

        quantity
    }

    /// Get the head order's slab key (oldest order)
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Lower the level total after a fill or a quantity cut
    pub fn reduce_quantity(&mut self, quantity: Decimal) {
        self.total_quantity -= quantity;
    }

    /// Raise the level total after a quantity increase. The caller checks
    /// [`has_room_for`](Self::has_room_for) first.
    pub fn increase_quantity(&mut self, quantity: Decimal) {
        self.total_quantity += quantity;
    }

    /// Walk the queue from oldest to newest
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelOrders<'a> {
        LevelOrders {
            slab,
            cursor: self.head,
        }
    }
}

/// Iterator over the orders of one level in arrival order.
///
/// Yields `(slab key, order)` pairs.
pub struct LevelOrders<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelOrders<'a> {
    type Item = (usize, &'a Order);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.slab.get(key)?;
        self.cursor = node.next;
        Some((key, &node.order))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_node(slab: &mut Slab<OrderNode>, id: &str, quantity: i64) -> usize {
        let order = Order::new(id, Side::Buy, Decimal::from(100), Decimal::from(quantity), 0);
        slab.insert(OrderNode::new(order))
    }

    fn ids(level: &PriceLevel, slab: &Slab<OrderNode>) -> Vec<String> {
        level.iter(slab).map(|(_, o)| o.id.to_string()).collect()
    }

    #[test]
    fn test_has_room_for_near_decimal_max() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(Decimal::from(100), Side::Buy);
        let key = slab.insert(OrderNode::new(Order::new(
            "B1",
            Side::Buy,
            Decimal::from(100),
            Decimal::MAX,
            0,
        )));
        level.push_back(key, &mut slab);

        assert!(!level.has_room_for(Decimal::ONE));
        assert!(level.has_room_for(Decimal::ZERO));

        level.remove(key, &mut slab);
        assert!(level.has_room_for(Decimal::MAX));
    }

    #[test]
    fn test_price_level_new() {
        let level = PriceLevel::new(Decimal::from(100), Side::Buy);

        assert_eq!(level.price, Decimal::from(100));
        assert_eq!(level.side, Side::Buy);
        assert_eq!(level.total_quantity, Decimal::ZERO);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_push_multiple() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(Decimal::from(100), Side::Buy);

        let key1 = create_test_node(&mut slab, "B1", 1);
        let key2 = create_test_node(&mut slab, "B2", 2);
        let key3 = create_test_node(&mut slab, "B3", 3);

        level.push_back(key1, &mut slab);
        level.push_back(key2, &mut slab);
        level.push_back(key3, &mut slab);

        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_quantity, Decimal::from(6));
        assert_eq!(level.head, Some(key1));
        assert_eq!(level.tail, Some(key3));
        assert_eq!(ids(&level, &slab), ["B1", "B2", "B3"]);

        let node2 = &slab[key2];
        assert_eq!(node2.prev, Some(key1));
        assert_eq!(node2.next, Some(key3));
    }

    #[test]
    fn test_price_level_remove_middle() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(Decimal::from(100), Side::Buy);

        let key1 = create_test_node(&mut slab, "B1", 1);
        let key2 = create_test_node(&mut slab, "B2", 2);
        let key3 = create_test_node(&mut slab, "B3", 3);
        for key in [key1, key2, key3] {
            level.push_back(key, &mut slab);
        }

        let removed_qty = level.remove(key2, &mut slab);

        assert_eq!(removed_qty, Decimal::from(2));
        assert_eq!(level.order_count, 2);
        assert_eq!(level.total_quantity, Decimal::from(4));
        assert_eq!(ids(&level, &slab), ["B1", "B3"]);
        assert!(slab[key2].is_unlinked());
    }

    #[test]
    fn test_price_level_remove_head_and_tail() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(Decimal::from(100), Side::Buy);

        let key1 = create_test_node(&mut slab, "B1", 1);
        let key2 = create_test_node(&mut slab, "B2", 2);
        let key3 = create_test_node(&mut slab, "B3", 3);
        for key in [key1, key2, key3] {
            level.push_back(key, &mut slab);
        }

        level.remove(key1, &mut slab);
        assert_eq!(level.head, Some(key2));
        assert!(slab[key2].prev.is_none());

        level.remove(key3, &mut slab);
        assert_eq!(level.tail, Some(key2));
        assert_eq!(ids(&level, &slab), ["B2"]);
    }

    #[test]
    fn test_price_level_remove_only() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(Decimal::from(100), Side::Buy);

        let key = create_test_node(&mut slab, "B1", 1);
        level.push_back(key, &mut slab);
        level.remove(key, &mut slab);

        assert!(level.is_empty());
        assert_eq!(level.total_quantity, Decimal::ZERO);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert_eq!(level.iter(&slab).count(), 0);
    }

    #[test]
    fn test_price_level_quantity_adjustments() {
        let mut level = PriceLevel::new(Decimal::from(100), Side::Sell);
        level.total_quantity = Decimal::from(10);

        level.reduce_quantity(Decimal::from(3));
        assert_eq!(level.total_quantity, Decimal::from(7));

        level.increase_quantity(Decimal::new(5, 1));
        assert_eq!(level.total_quantity, Decimal::new(75, 1));
    }

    #[test]
    fn test_price_level_iter_is_restartable() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(Decimal::from(100), Side::Buy);

        let key1 = create_test_node(&mut slab, "B1", 1);
        let key2 = create_test_node(&mut slab, "B2", 2);
        level.push_back(key1, &mut slab);
        level.push_back(key2, &mut slab);

        assert_eq!(level.iter(&slab).take(1).count(), 1);
        assert_eq!(ids(&level, &slab), ["B1", "B2"]);
        assert_eq!(level.peek_head(), Some(key1));
    }
}
