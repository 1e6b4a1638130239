//! # Limit Book
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Side, Trade) and decimal helpers
//! - **OrderBook**: Slab arena, side-aware price indexes, id lookup
//! - **Engine**: Deterministic crossing loop
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating Point**: Prices and quantities are exact decimals
//! 3. **Single Owner**: Orders live in one arena; indexes hold handles
//! 4. **Synchronous Execution**: Single-threaded; callers synchronise externally
//!
//! ## Example
//!
//! ```
//! use limit_book::{Order, OrderBook, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::new();
//! book.add_order(Order::new("B1", Side::Buy, Decimal::from(100), Decimal::from(10), 0)).unwrap();
//! book.add_order(Order::new("S1", Side::Sell, Decimal::from(99), Decimal::from(4), 0)).unwrap();
//!
//! let result = book.run_matching();
//! assert_eq!(result.trades[0].quantity, Decimal::from(4));
//! assert_eq!(book.current_market_price(), Some(Decimal::from(99)));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Trade
pub mod types;

/// Order book: arena storage, price levels, side indexes
pub mod orderbook;

/// Matching procedure
pub mod engine;

/// Book configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{BookConfig, MatchMode};
pub use engine::MatchResult;
pub use error::{BookError, InvariantViolation, Result};
pub use orderbook::{LevelSummary, OrderBook, PriceLevel};
pub use types::{Order, OrderId, Side, Trade};
