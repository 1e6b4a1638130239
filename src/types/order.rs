//! Order types for the limit order book.
//!
//! ## Identifiers
//!
//! Orders are addressed by caller-supplied string identifiers wrapped in
//! [`OrderId`]. The book rejects a second admission of a resting id.
//!
//! ## Decimal Representation
//!
//! Prices and quantities are `rust_decimal::Decimal`. Equality is numeric,
//! so `100` and `100.00` address the same price level.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::BookError;

// ============================================================================
// OrderId
// ============================================================================

/// Unique order identifier (caller supplied)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct OrderId(String);

impl OrderId {
    /// Create an identifier from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for OrderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    #[default]
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Lowercase wire name ("buy" / "sell")
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses "buy"/"sell" (or "bid"/"ask"), case-insensitive.
///
/// Anything else is an `InvalidArgument`.
impl FromStr for Side {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "bid" => Ok(Side::Buy),
            "sell" | "ask" => Ok(Side::Sell),
            other => Err(BookError::invalid(format!("unknown side {other:?}"))),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order in the order book.
///
/// `quantity` is the open (unfilled) quantity and shrinks as the order
/// trades. `timestamp` is supplied by the caller and is informational: time
/// priority inside a level follows arrival order in the book, not this field.
///
/// ## Example
///
/// ```
/// use limit_book::types::{Order, Side};
/// use rust_decimal::Decimal;
///
/// let order = Order::new("B1", Side::Buy, Decimal::from(100), Decimal::from(10), 0);
/// assert_eq!(order.side, Side::Buy);
/// assert_eq!(order.id.as_str(), "B1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,

    /// Buy or Sell
    pub side: Side,

    /// Limit price (positive)
    pub price: Decimal,

    /// Open quantity (positive while resting)
    pub quantity: Decimal,

    /// Caller-supplied creation time in milliseconds
    pub timestamp: u64,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `id` - Unique order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Limit price
    /// * `quantity` - Order quantity
    /// * `timestamp` - Creation time in milliseconds
    pub fn new(
        id: impl Into<OrderId>,
        side: Side,
        price: Decimal,
        quantity: Decimal,
        timestamp: u64,
    ) -> Self {
        Self {
            id: id.into(),
            side,
            price,
            quantity,
            timestamp,
        }
    }

    /// Check if the order has no open quantity left
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The quantity actually filled (capped at the open quantity)
    pub fn fill(&mut self, fill_qty: Decimal) -> Decimal {
        let actual_fill = fill_qty.min(self.quantity);
        self.quantity -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
