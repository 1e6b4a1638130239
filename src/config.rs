//! Book configuration.
//!
//! ## Match Modes
//!
//! - [`MatchMode::OnDemand`]: mutations never trade; the caller decides when
//!   to call `run_matching`. Between calls the book may be crossed.
//! - [`MatchMode::Continuous`]: every mutation that can create a cross
//!   (admission, price or side amendment) matches before returning.
//!
//! ## Example
//!
//! ```
//! use limit_book::{BookConfig, MatchMode, OrderBook};
//!
//! let config = BookConfig::default()
//!     .order_capacity(10_000)
//!     .match_mode(MatchMode::Continuous);
//! let book = OrderBook::with_config(config);
//!
//! assert!(book.capacity() >= 10_000);
//! assert_eq!(book.match_mode(), MatchMode::Continuous);
//! ```

/// Default number of pre-allocated order slots
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

/// When the book runs its matching procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Only when `run_matching` is called explicitly
    #[default]
    OnDemand,
    /// After every cross-creating mutation
    Continuous,
}

/// Construction-time settings for an [`OrderBook`](crate::OrderBook)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookConfig {
    /// Orders to pre-allocate in the arena and id index
    pub order_capacity: usize,

    /// Matching trigger policy
    pub match_mode: MatchMode,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            match_mode: MatchMode::OnDemand,
        }
    }
}

impl BookConfig {
    /// Set the pre-allocated order capacity
    pub fn order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    /// Set the matching trigger policy
    pub fn match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}
