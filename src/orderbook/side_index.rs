//! Ordered price index for one side of the book.
//!
//! ## Side-Aware Ordering
//!
//! A single [`SideIndex`] type serves both sides. The ordering is injected
//! through the [`PriceOrdering`] strategy, which maps a price to a `BTreeMap`
//! key whose natural order is the side's priority order:
//!
//! - [`HighestFirst`] (bids): key is `Reverse(price)`, best = highest price
//! - [`LowestFirst`] (asks): key is `price`, best = lowest price
//!
//! Either way the first map entry is the best level, so "best" is always
//! `first_key_value` and best-first traversal is plain in-order iteration.
//!
//! ## Level Lifecycle
//!
//! Levels are created lazily by [`SideIndex::push`] and deleted by
//! [`SideIndex::unlink`] the moment their queue empties. No empty level is
//! ever left behind.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | get / upsert / remove | O(log L) |
//! | best | O(log L) |
//! | len | O(1) |

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use rust_decimal::Decimal;
use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::Side;

/// Strategy that decides which price a side ranks first.
pub trait PriceOrdering {
    /// Map key whose `Ord` is this side's priority order
    type Key: Ord + Copy + fmt::Debug;

    /// Side served by this ordering
    const SIDE: Side;

    /// Map a price to its index key
    fn key(price: Decimal) -> Self::Key;

    /// `true` when `a` ranks strictly ahead of `b`
    fn is_better(a: Decimal, b: Decimal) -> bool {
        Self::key(a) < Self::key(b)
    }
}

/// Bid ordering: highest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestFirst;

impl PriceOrdering for HighestFirst {
    type Key = Reverse<Decimal>;
    const SIDE: Side = Side::Buy;

    #[inline]
    fn key(price: Decimal) -> Self::Key {
        Reverse(price)
    }
}

/// Ask ordering: lowest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestFirst;

impl PriceOrdering for LowestFirst {
    type Key = Decimal;
    const SIDE: Side = Side::Sell;

    #[inline]
    fn key(price: Decimal) -> Self::Key {
        price
    }
}

/// Bid side index
pub type BidIndex = SideIndex<HighestFirst>;

/// Ask side index
pub type AskIndex = SideIndex<LowestFirst>;

/// Price levels of one side, kept in best-first order.
#[derive(Debug, Clone)]
pub struct SideIndex<O: PriceOrdering> {
    levels: BTreeMap<O::Key, PriceLevel>,
    _ordering: PhantomData<O>,
}

impl<O: PriceOrdering> Default for SideIndex<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: PriceOrdering> SideIndex<O> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            _ordering: PhantomData,
        }
    }

    /// Side this index holds
    #[inline]
    pub fn side(&self) -> Side {
        O::SIDE
    }

    /// Number of distinct price levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at `price`, if any
    pub fn get(&self, price: Decimal) -> Option<&PriceLevel> {
        self.levels.get(&O::key(price))
    }

    pub fn get_mut(&mut self, price: Decimal) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&O::key(price))
    }

    /// Insert `level`, replacing any level at the same price
    ///
    /// # Returns
    ///
    /// The replaced level, if there was one
    pub fn upsert(&mut self, level: PriceLevel) -> Option<PriceLevel> {
        self.levels.insert(O::key(level.price), level)
    }

    /// Delete the level at `price`
    pub fn remove(&mut self, price: Decimal) -> Option<PriceLevel> {
        self.levels.remove(&O::key(price))
    }

    /// Top-priority level (highest bid / lowest ask)
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.first_key_value().map(|(_, level)| level)
    }

    pub fn best_mut(&mut self) -> Option<&mut PriceLevel> {
        self.levels.values_mut().next()
    }

    /// Price of the top-priority level
    pub fn best_price(&self) -> Option<Decimal> {
        self.best().map(|level| level.price)
    }

    /// Levels in best-first order
    ///
    /// Borrowing again starts a fresh traversal from the best level.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PriceLevel> + '_ {
        self.levels.values()
    }

    /// `true` when `a` ranks strictly ahead of `b` on this side
    #[inline]
    pub fn is_better(&self, a: Decimal, b: Decimal) -> bool {
        O::is_better(a, b)
    }

    /// Append the order at `key` to the tail of the level at `price`,
    /// creating the level if needed.
    pub fn push(&mut self, price: Decimal, key: usize, slab: &mut Slab<OrderNode>) {
        self.levels
            .entry(O::key(price))
            .or_insert_with(|| PriceLevel::new(price, O::SIDE))
            .push_back(key, slab);
    }

    /// Unlink the order at `key` from the level at `price`, deleting the
    /// level if it empties.
    ///
    /// # Returns
    ///
    /// The open quantity unlinked, or `None` if no level exists at `price`
    pub fn unlink(&mut self, price: Decimal, key: usize, slab: &mut Slab<OrderNode>) -> Option<Decimal> {
        let map_key = O::key(price);
        let level = self.levels.get_mut(&map_key)?;
        let quantity = level.remove(key, slab);
        if level.is_empty() {
            self.levels.remove(&map_key);
        }
        Some(quantity)
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
