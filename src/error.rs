//! Error types for the limit order book.
//!
//! Every fallible operation validates its inputs before touching any
//! structure, so an `Err` always leaves the book exactly as it was.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{OrderId, Side};

/// Errors returned by book operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// The referenced order identifier is not resting in the book
    #[error("order not found: {order_id}")]
    NotFound { order_id: OrderId },

    /// Negative quantity, non-positive price, or an unknown side value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An order with the same identifier is already resting
    #[error("duplicate order id: {order_id}")]
    DuplicateOrderId { order_id: OrderId },
}

impl BookError {
    pub(crate) fn not_found(order_id: &str) -> Self {
        BookError::NotFound {
            order_id: OrderId::from(order_id),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BookError::InvalidArgument(message.into())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, BookError>;

/// A broken structural invariant found by `OrderBook::check_invariants`.
///
/// Never produced by a correct book; exists so tests can audit state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("empty price level at {price} on {side:?} side")]
    EmptyLevel { side: Side, price: Decimal },

    #[error("{side:?} levels out of best-first order: {prev} then {next}")]
    Ordering {
        side: Side,
        prev: Decimal,
        next: Decimal,
    },

    #[error("order {order_id} rests at {side:?} {level_price} but carries {order_side:?} {order_price}")]
    MisplacedOrder {
        order_id: OrderId,
        side: Side,
        level_price: Decimal,
        order_side: Side,
        order_price: Decimal,
    },

    #[error("order {order_id} has non-positive quantity {quantity}")]
    NonPositiveQuantity { order_id: OrderId, quantity: Decimal },

    #[error("level {price} on {side:?} side reports {reported} but holds {actual}")]
    LevelTotals {
        side: Side,
        price: Decimal,
        reported: Decimal,
        actual: Decimal,
    },

    #[error("id index holds {indexed} orders but levels hold {linked}")]
    IndexMismatch { indexed: usize, linked: usize },

    #[error("order {order_id} is linked in a level but missing from the id index")]
    Unindexed { order_id: OrderId },
}
