//! Matching procedure for the limit order book.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same book state always produces the same trades
//! 2. **Decimal Math**: No floating-point operations
//! 3. **Synchronous Execution**: Runs to completion, no suspension points
//! 4. **Price-Time Priority**: Best price first, then FIFO
//!
//! ## Matching Rules
//!
//! - The oldest order at the best bid trades with the oldest at the best ask
//! - Trades execute at the sell order's price
//! - **Partial fills** are supported; the remainder keeps its queue position
//! - Matching stops as soon as best bid < best ask
//!
//! ## Example
//!
//! ```
//! use limit_book::OrderBook;
//! use limit_book::types::{Order, Side};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::with_capacity(1000);
//! book.add_order(Order::new("S1", Side::Sell, Decimal::from(50_000), Decimal::ONE, 0)).unwrap();
//! book.add_order(Order::new("B1", Side::Buy, Decimal::from(50_000), Decimal::ONE, 0)).unwrap();
//!
//! let result = book.run_matching();
//! assert_eq!(result.trades.len(), 1);
//! assert!(book.is_empty());
//! ```

pub mod matcher;

pub use matcher::MatchResult;
