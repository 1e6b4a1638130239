//! End-to-end scenarios for the limit order book.
//!
//! Each test drives the public API only: admissions, amendments, explicit
//! matching passes and market-data queries.

use limit_book::{BookError, Order, OrderBook, Side, Trade};
use rust_decimal::Decimal;

fn px(value: i64) -> Decimal {
    Decimal::from(value)
}

fn order(id: &str, side: Side, price: i64, quantity: i64) -> Order {
    Order::new(id, side, px(price), px(quantity), 0)
}

/// (id, price, quantity) for every resting order of a side, best first
fn snapshot(book: &OrderBook, side: Side) -> Vec<(String, Decimal, Decimal)> {
    book.orders(side)
        .into_iter()
        .map(|o| (o.id.to_string(), o.price, o.quantity))
        .collect()
}

fn seeded_book() -> OrderBook {
    let mut book = OrderBook::new();
    book.add_order(order("B1", Side::Buy, 100, 10)).unwrap();
    book.add_order(order("S1", Side::Sell, 105, 5)).unwrap();
    book.add_order(order("B2", Side::Buy, 102, 7)).unwrap();
    book.add_order(order("S2", Side::Sell, 99, 8)).unwrap();
    book
}

#[test]
fn crossing_book_matches_to_rest() {
    let mut book = seeded_book();

    // Matching is on demand: the book sits crossed until asked
    assert_eq!(book.best_bid(), Some(px(102)));
    assert_eq!(book.best_ask(), Some(px(99)));

    let result = book.run_matching();

    assert_eq!(
        result.trades,
        [
            Trade::new(1, "B2", "S2", px(99), px(7)),
            Trade::new(2, "B1", "S2", px(99), px(1)),
        ]
    );
    assert_eq!(snapshot(&book, Side::Buy), [("B1".to_string(), px(100), px(9))]);
    assert_eq!(snapshot(&book, Side::Sell), [("S1".to_string(), px(105), px(5))]);
    assert!(!book.contains_order("B2"));
    assert!(!book.contains_order("S2"));
    assert_eq!(book.last_traded_price(), Some(px(99)));
    assert_eq!(book.current_market_price(), Some(px(99)));
    assert!(book.check_invariants().is_ok());
}

#[test]
fn scripted_session_after_matching() {
    let mut book = seeded_book();
    book.run_matching();

    // B2 was filled in the first pass
    assert_eq!(
        book.modify_price("B2", px(98)),
        Err(BookError::NotFound { order_id: "B2".into() })
    );
    book.modify_side("S1", Side::Buy).unwrap();
    book.modify_quantity("B1", Decimal::ZERO).unwrap();

    assert_eq!(snapshot(&book, Side::Buy), [("S1".to_string(), px(105), px(5))]);
    assert!(snapshot(&book, Side::Sell).is_empty());

    let result = book.run_matching();
    assert!(result.is_empty());

    // No new trade and no ask: last traded price still rules
    assert_eq!(book.mid_price(), None);
    assert_eq!(book.current_market_price(), Some(px(99)));
    assert!(book.check_invariants().is_ok());
}

#[test]
fn modify_quantity_on_unknown_id_leaves_book_unchanged() {
    let mut book = seeded_book();
    let before = book.state_root();

    let err = book.modify_quantity("nope", px(3)).unwrap_err();

    assert_eq!(err, BookError::NotFound { order_id: "nope".into() });
    assert_eq!(book.state_root(), before);
    assert_eq!(book.order_count(), 4);
}

#[test]
fn empty_book_reports_nothing() {
    let book = OrderBook::new();

    assert_eq!(book.best_bid(), None);
    assert_eq!(book.best_ask(), None);
    assert_eq!(book.mid_price(), None);
    assert_eq!(book.current_market_price(), None);
    assert!(book.orders(Side::Buy).is_empty());
    assert!(book.orders(Side::Sell).is_empty());
}

#[test]
fn mid_price_fallback_before_any_trade() {
    let mut book = OrderBook::new();
    book.add_order(order("B1", Side::Buy, 100, 1)).unwrap();
    book.add_order(order("S1", Side::Sell, 105, 1)).unwrap();

    assert_eq!(book.mid_price(), Some(Decimal::new(1025, 1)));
    assert_eq!(book.current_market_price(), Some(Decimal::new(1025, 1)));
}

#[test]
fn add_then_cancel_restores_book() {
    let mut book = seeded_book();
    let before_root = book.state_root();
    let before_bids = snapshot(&book, Side::Buy);
    let before_asks = snapshot(&book, Side::Sell);

    book.add_order(order("B9", Side::Buy, 101, 3)).unwrap();
    let cancelled = book.remove_order("B9").unwrap();

    assert_eq!(cancelled.quantity, px(3));
    assert_eq!(snapshot(&book, Side::Buy), before_bids);
    assert_eq!(snapshot(&book, Side::Sell), before_asks);
    assert_eq!(book.state_root(), before_root);
    assert_eq!(book.bid_levels(), 2);
}

#[test]
fn cancel_twice_is_not_found() {
    let mut book = seeded_book();

    book.remove_order("S1").unwrap();
    assert!(matches!(
        book.remove_order("S1"),
        Err(BookError::NotFound { .. })
    ));
}

#[test]
fn price_amendment_requeues_at_back() {
    let mut book = OrderBook::new();
    book.add_order(order("S1", Side::Sell, 101, 1)).unwrap();
    book.add_order(order("S2", Side::Sell, 101, 1)).unwrap();

    // Re-pricing to the same price still gives up priority
    book.modify_price("S1", px(101)).unwrap();
    book.add_order(order("B1", Side::Buy, 101, 1)).unwrap();
    let result = book.run_matching();

    assert_eq!(result.trades[0].sell_order_id.as_str(), "S2");
}

#[test]
fn quantity_amendment_keeps_priority() {
    let mut book = OrderBook::new();
    book.add_order(order("S1", Side::Sell, 101, 1)).unwrap();
    book.add_order(order("S2", Side::Sell, 101, 1)).unwrap();

    book.modify_quantity("S1", px(4)).unwrap();
    book.add_order(order("B1", Side::Buy, 101, 2)).unwrap();
    let result = book.run_matching();

    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].sell_order_id.as_str(), "S1");
    assert_eq!(book.get_order("S1").map(|o| o.quantity), Some(px(2)));
}

#[test]
fn decimal_prices_share_levels() {
    let mut book = OrderBook::new();
    book.add_order(Order::new("B1", Side::Buy, Decimal::new(10050, 2), px(1), 0))
        .unwrap();
    book.add_order(Order::new("B2", Side::Buy, Decimal::new(1005, 1), px(2), 0))
        .unwrap();

    assert_eq!(book.bid_levels(), 1);
    assert_eq!(book.levels(Side::Buy)[0].total_quantity, px(3));
}

#[test]
fn side_amendment_validates_text() {
    let mut book = seeded_book();
    let before = book.state_root();

    assert!(matches!(
        book.modify_side_str("B1", "sideways"),
        Err(BookError::InvalidArgument(_))
    ));
    assert_eq!(book.state_root(), before);
}

#[test]
fn admission_that_would_overflow_a_level_is_rejected() {
    let mut book = OrderBook::new();
    book.add_order(Order::new("B1", Side::Buy, px(100), Decimal::MAX, 0))
        .unwrap();
    let before = book.state_root();

    let err = book
        .add_order(Order::new("B2", Side::Buy, px(100), Decimal::MAX, 0))
        .unwrap_err();

    assert!(matches!(err, BookError::InvalidArgument(_)));
    assert!(!book.contains_order("B2"));
    assert_eq!(book.state_root(), before);
    assert_eq!(book.levels(Side::Buy)[0].total_quantity, Decimal::MAX);
    assert!(book.check_invariants().is_ok());

    // A different level still has room
    book.add_order(Order::new("B2", Side::Buy, px(101), Decimal::MAX, 0))
        .unwrap();
}

#[test]
fn quantity_increase_that_would_overflow_a_level_is_rejected() {
    let mut book = OrderBook::new();
    book.add_order(Order::new("S1", Side::Sell, px(100), Decimal::MAX - px(1), 0))
        .unwrap();
    book.add_order(order("S2", Side::Sell, 100, 1)).unwrap();
    let before = book.state_root();

    assert!(matches!(
        book.modify_quantity("S2", px(2)),
        Err(BookError::InvalidArgument(_))
    ));
    assert_eq!(book.state_root(), before);
    assert_eq!(book.get_order("S2").map(|o| o.quantity), Some(px(1)));
    assert!(book.check_invariants().is_ok());

    // Shrinking is always allowed
    book.modify_quantity("S1", px(5)).unwrap();
    book.modify_quantity("S2", px(2)).unwrap();
    assert_eq!(book.levels(Side::Sell)[0].total_quantity, px(7));
}

#[test]
fn mid_price_near_decimal_max() {
    let mut book = OrderBook::new();
    book.add_order(Order::new("B1", Side::Buy, Decimal::MAX - px(1), px(1), 0))
        .unwrap();
    book.add_order(Order::new("S1", Side::Sell, Decimal::MAX, px(1), 0))
        .unwrap();

    let mid = book.mid_price().unwrap();
    assert!(mid >= Decimal::MAX - px(1) && mid <= Decimal::MAX);
    assert_eq!(book.current_market_price(), Some(mid));
    assert!(book.spread().is_some());
}
