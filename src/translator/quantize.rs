//! Float-to-integer quantization against a market.
//!
//! Each function validates its input, converts it exactly, and applies
//! the one rounding rule that belongs to it. Errors name the field.

use crate::error::{Result, TranslationError};
use crate::types::quantity::{round_lots, round_price_to_ticks, Ratio};
use crate::types::{MarketParameters, Side};

/// Price in quote units per base unit -> integer ticks, rounded for `side`.
///
/// Fails on non-finite, non-positive, or sub-tick (after rounding) prices.
pub fn quantize_price(side: Side, price: f64, market: &MarketParameters) -> Result<u64> {
    if !price.is_finite() {
        return Err(TranslationError::InvalidPrice {
            price,
            reason: "must be finite",
        });
    }
    if price <= 0.0 {
        return Err(TranslationError::InvalidPrice {
            price,
            reason: "must be positive",
        });
    }

    let exact_price = Ratio::from_float(price).ok_or(TranslationError::InvalidPrice {
        price,
        reason: "not representable as a decimal",
    })?;
    let exact_ticks =
        market
            .price_to_exact_ticks(exact_price)
            .ok_or(TranslationError::ArithmeticOverflow {
                quantity: "price_in_ticks",
            })?;

    let ticks = to_u64(round_price_to_ticks(side, exact_ticks), "price_in_ticks")?;
    if ticks == 0 {
        return Err(TranslationError::InvalidPrice {
            price,
            reason: "rounds to zero ticks",
        });
    }
    Ok(ticks)
}

/// Whole base units -> base lots, rounded down. Zero is allowed here.
pub fn quantize_base_size(field: &'static str, size: f64, market: &MarketParameters) -> Result<u64> {
    let exact = market
        .base_units_to_exact_lots(checked_size(field, size)?)
        .ok_or(TranslationError::ArithmeticOverflow { quantity: field })?;
    to_u64(round_lots(exact), field)
}

/// Whole quote units -> quote lots, rounded down. Zero is allowed here.
pub fn quantize_quote_size(
    field: &'static str,
    size: f64,
    market: &MarketParameters,
) -> Result<u64> {
    let exact = market
        .quote_units_to_exact_lots(checked_size(field, size)?)
        .ok_or(TranslationError::ArithmeticOverflow { quantity: field })?;
    to_u64(round_lots(exact), field)
}

fn checked_size(field: &'static str, value: f64) -> Result<Ratio> {
    if !value.is_finite() {
        return Err(TranslationError::InvalidSize {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(TranslationError::InvalidSize {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ratio::from_float(value).ok_or(TranslationError::InvalidSize {
        field,
        value,
        reason: "not representable as a decimal",
    })
}

fn to_u64(value: u128, quantity: &'static str) -> Result<u64> {
    u64::try_from(value).map_err(|_| TranslationError::ArithmeticOverflow { quantity })
}
