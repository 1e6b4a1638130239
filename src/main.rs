//! Limit Book - demonstration binary
//!
//! Replays a fixed script against a fresh book: four orders, a matching
//! pass, three amendments and a second matching pass. Set `RUST_LOG` to
//! change verbosity (default `limit_book=info`).

use limit_book::types::price::{format_decimal, parse_price, parse_quantity};
use limit_book::{MatchResult, Order, OrderBook, Result, Side};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("limit_book=info")),
        )
        .init();

    let mut book = OrderBook::new();

    for (id, side, price, quantity) in [
        ("B1", "buy", "100", "10"),
        ("S1", "sell", "105", "5"),
        ("B2", "buy", "102", "7"),
        ("S2", "sell", "99", "8"),
    ] {
        book.add_order(Order::new(
            id,
            side.parse::<Side>()?,
            parse_price(price)?,
            parse_quantity(quantity)?,
            0,
        ))?;
    }
    print_book(&book);

    print_trades(&book.run_matching());
    print_market_price(&book);
    print_book(&book);

    // S1 crosses over to the bid side
    let s1_side = book.get_order("S1").map(|o| o.side.opposite()).unwrap_or(Side::Buy);
    for result in [
        book.modify_price("B2", Decimal::from(98)),
        book.modify_side("S1", s1_side),
        book.modify_quantity("B1", Decimal::ZERO),
    ] {
        if let Err(e) = result {
            println!("{e}");
        }
    }
    print_book(&book);

    print_trades(&book.run_matching());
    print_market_price(&book);
    print_book(&book);

    Ok(())
}

fn print_book(book: &OrderBook) {
    println!("Order Book:");
    for (title, side) in [("Buy Orders:", Side::Buy), ("Sell Orders:", Side::Sell)] {
        println!("{title}");
        for order in book.orders(side) {
            println!(
                "  OrderID: {}, Price: {}, Quantity: {}",
                order.id,
                format_decimal(order.price),
                format_decimal(order.quantity)
            );
        }
    }
    println!("------------------------------");
}

fn print_trades(result: &MatchResult) {
    for trade in &result.trades {
        let notional = trade
            .notional()
            .map_or_else(|| "overflow".to_string(), format_decimal);
        println!(
            "Trade #{}: {} buys {} from {} at {} (notional {})",
            trade.id,
            trade.buy_order_id,
            format_decimal(trade.quantity),
            trade.sell_order_id,
            format_decimal(trade.price),
            notional
        );
    }
}

fn print_market_price(book: &OrderBook) {
    match book.current_market_price() {
        Some(price) => println!("Current Market Price: {}", format_decimal(price)),
        None => println!("Market price is not available."),
    }
}
