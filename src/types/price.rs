//! Decimal price and quantity utilities.
//!
//! ## Overview
//!
//! All prices and quantities use `rust_decimal::Decimal` so that arithmetic
//! is exact in base 10. A book built from the same inputs always reaches the
//! same state, independent of hardware.
//!
//! ## Validation Rules
//!
//! - Prices must be strictly positive
//! - Quantities must not be negative (zero is only meaningful as a
//!   "remove this order" amendment)
//!
//! ## Examples
//!
//! ```
//! use limit_book::types::price::{parse_price, format_decimal};
//!
//! let price = parse_price("100.50").unwrap();
//! assert_eq!(format_decimal(price), "100.5");
//!
//! assert!(parse_price("-1").is_err());
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{BookError, Result};

// ============================================================================
// Parsing and Validation
// ============================================================================

/// Parse a decimal string into a validated price
///
/// # Errors
///
/// `InvalidArgument` if the string is not a decimal or the value is not
/// strictly positive.
pub fn parse_price(s: &str) -> Result<Decimal> {
    let price = parse_decimal(s)?;
    validate_price(price)?;
    Ok(price)
}

/// Parse a decimal string into a validated quantity
///
/// # Errors
///
/// `InvalidArgument` if the string is not a decimal or the value is negative.
pub fn parse_quantity(s: &str) -> Result<Decimal> {
    let quantity = parse_decimal(s)?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    Decimal::from_str(s.trim()).map_err(|e| BookError::invalid(format!("{s:?} is not a decimal: {e}")))
}

/// Reject prices that are zero or negative
pub fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(BookError::invalid(format!("price must be positive, got {price}")));
    }
    Ok(())
}

/// Reject negative quantities
pub fn validate_quantity(quantity: Decimal) -> Result<()> {
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(BookError::invalid(format!(
            "quantity must not be negative, got {quantity}"
        )));
    }
    Ok(())
}

// ============================================================================
// Arithmetic and Formatting
// ============================================================================

/// Arithmetic mean of two prices
///
/// Prices whose sum exceeds `Decimal::MAX` are averaged by stepping half the
/// distance up from the lower one.
///
/// # Example
///
/// ```
/// use limit_book::types::price::midpoint;
/// use rust_decimal::Decimal;
///
/// assert_eq!(midpoint(Decimal::from(100), Decimal::from(105)), Decimal::new(1025, 1));
/// ```
pub fn midpoint(a: Decimal, b: Decimal) -> Decimal {
    let two = Decimal::from(2);
    match a.checked_add(b) {
        Some(sum) => sum / two,
        None => {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            low + (high - low) / two
        }
    }
}

/// Render a decimal without trailing zeros
///
/// # Example
///
/// ```
/// use limit_book::types::price::format_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_decimal(Decimal::new(10000, 2)), "100");
/// assert_eq!(format_decimal(Decimal::new(1025, 1)), "102.5");
/// ```
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
