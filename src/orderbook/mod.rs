//! Order book module.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: every resting order lives in one arena
//! - **Side indexes**: price levels per side, ordered best-first by a
//!   side-aware ordering strategy
//! - **Price-time priority**: FIFO ordering at each price level
//!
//! ## Components
//!
//! - [`OrderNode`]: Wrapper around `Order` with linked-list pointers for price level
//! - [`PriceLevel`]: Collection of orders at a single price point
//! - [`SideIndex`]: Ordered price map for one side ([`BidIndex`], [`AskIndex`])
//! - [`OrderBook`]: Both sides, the id index and market data
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log L) |
//! | Cancel order by ID | O(log L) |
//! | Quantity amendment | O(log L) |
//! | Best bid/ask | O(log L) |
//! | Match step | O(log L) |
//!
//! L = number of price levels on the affected side.

pub mod node;
pub mod level;
pub mod side_index;
pub mod book;

pub use node::OrderNode;
pub use level::{LevelOrders, PriceLevel};
pub use side_index::{AskIndex, BidIndex, HighestFirst, LowestFirst, PriceOrdering, SideIndex};
pub use book::{LevelSummary, OrderBook};
