//! Trade type representing an executed match between two resting orders.

use rust_decimal::Decimal;

use crate::types::OrderId;

/// A trade represents a single match between the oldest order at the best
/// bid and the oldest order at the best ask.
///
/// ## Price Discovery
///
/// The trade always executes at the sell order's price.
///
/// ## Example
///
/// ```
/// use limit_book::types::Trade;
/// use rust_decimal::Decimal;
///
/// let trade = Trade::new(1, "B2", "S2", Decimal::from(99), Decimal::from(7));
/// assert_eq!(trade.notional(), Some(Decimal::from(693)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    /// Sequential trade identifier, starting at 1 per book
    pub id: u64,

    /// Buy-side order ID
    pub buy_order_id: OrderId,

    /// Sell-side order ID
    pub sell_order_id: OrderId,

    /// Execution price (the sell order's price)
    pub price: Decimal,

    /// Executed quantity
    pub quantity: Decimal,
}

impl Trade {
    /// Create a new trade
    pub fn new(
        id: u64,
        buy_order_id: impl Into<OrderId>,
        sell_order_id: impl Into<OrderId>,
        price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id,
            buy_order_id: buy_order_id.into(),
            sell_order_id: sell_order_id.into(),
            price,
            quantity,
        }
    }

    /// Notional value of this trade (price * quantity), `None` on overflow
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
