//! Core data types for the limit order book
//!
//! ## Types
//!
//! - [`Order`]: A limit order resting in the book
//! - [`OrderId`]: Caller-supplied order identifier
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: An executed trade between two orders
//!
//! Prices and quantities are `rust_decimal::Decimal`; see [`price`] for
//! parsing and validation helpers.

mod order;
mod trade;
pub mod price;

// Re-export all types at module level
pub use order::{Order, OrderId, Side};
pub use trade::Trade;
