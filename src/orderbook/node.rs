//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so an order
//! can be unlinked from its price level in O(1) once its slab key is known.
//!
//! ## Single Owner
//!
//! The slab is the only place order data lives. The id index and the price
//! level queues hold slab keys (`usize`), never copies of the order, so the
//! two views cannot drift apart.
//!
//! ## Linked List
//!
//! Orders at the same price level form a doubly-linked list:
//! - `next`: Points to the next order (newer) in the price level
//! - `prev`: Points to the previous order (older) in the price level

use rust_decimal::Decimal;

use crate::types::{Order, OrderId, Side};

/// Order node stored in the slab.
///
/// Contains the order data plus linked-list pointers for the price level queue.
/// The pointers are slab keys (`usize`), not direct references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Next order in the price level queue (slab key)
    /// None if this is the tail (newest order)
    pub next: Option<usize>,

    /// Previous order in the price level queue (slab key)
    /// None if this is the head (oldest order)
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new order node (not yet linked)
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::orderbook::OrderNode;
    /// use limit_book::types::{Order, Side};
    /// use rust_decimal::Decimal;
    ///
    /// let order = Order::new("B1", Side::Buy, Decimal::from(100), Decimal::from(10), 0);
    /// let node = OrderNode::new(order);
    ///
    /// assert!(node.is_unlinked());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no neighbours
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> &OrderId {
        &self.order.id
    }

    #[inline]
    pub fn price(&self) -> Decimal {
        self.order.price
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side
    }

    /// Open quantity
    #[inline]
    pub fn quantity(&self) -> Decimal {
        self.order.quantity
    }

    /// Fill a portion of this order, returning the amount filled
    #[inline]
    pub fn fill(&mut self, quantity: Decimal) -> Decimal {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
