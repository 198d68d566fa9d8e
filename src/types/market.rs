//! Market parameters and unit conversions.
//!
//! ## Units
//!
//! | Quantity | Unit |
//! |----------|------|
//! | `base_lot_size` | base atoms per base lot |
//! | `quote_lot_size` | quote atoms per quote lot |
//! | `tick_size` | quote lots per base lot, per tick |
//! | `*_decimals` | atoms per whole unit = 10^decimals |
//!
//! One tick is therefore worth
//! `tick_size * quote_lot_size * 10^base_decimals / (base_lot_size * 10^quote_decimals)`
//! quote units per whole base unit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslationError};
use crate::types::quantity::{pow10, Ratio, MAX_DECIMALS};
use crate::types::Side;

/// Immutable per-market snapshot supplied by the caller on every translation.
///
/// ## Example
///
/// ```
/// use order_translator::types::MarketParameters;
///
/// // 1 base unit = 10^6 atoms = 1 lot, tick worth 0.001 quote per base unit
/// let market = MarketParameters::new(1_000_000, 100, 10, 6, 6);
/// assert!(market.validate().is_ok());
/// assert_eq!(market.tick_value().unwrap().to_string(), "0.001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Smallest tradeable base quantity, in base atoms
    pub base_lot_size: u64,
    /// Smallest quote quantity, in quote atoms
    pub quote_lot_size: u64,
    /// Smallest price increment, in quote lots per base lot
    pub tick_size: u64,
    pub base_decimals: u32,
    pub quote_decimals: u32,
}

impl MarketParameters {
    pub fn new(
        base_lot_size: u64,
        quote_lot_size: u64,
        tick_size: u64,
        base_decimals: u32,
        quote_decimals: u32,
    ) -> Self {
        Self {
            base_lot_size,
            quote_lot_size,
            tick_size,
            base_decimals,
            quote_decimals,
        }
    }

    /// Check the positivity invariant and the supported decimal range.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("base_lot_size", self.base_lot_size),
            ("quote_lot_size", self.quote_lot_size),
            ("tick_size", self.tick_size),
        ] {
            if value == 0 {
                return Err(TranslationError::NonPositiveMarketParameter { field, value });
            }
        }
        for (field, value) in [
            ("base_decimals", self.base_decimals),
            ("quote_decimals", self.quote_decimals),
        ] {
            if value > MAX_DECIMALS {
                return Err(TranslationError::UnsupportedDecimals {
                    field,
                    value,
                    max: MAX_DECIMALS,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Forward conversions (whole units -> exact lots/ticks)
    // ========================================================================

    /// Exact (unrounded) price in ticks for a price in quote units per base unit.
    pub fn price_to_exact_ticks(&self, price: Ratio) -> Option<Ratio> {
        price
            .checked_mul(self.base_lot_size as u128)?
            .checked_mul(pow10(self.quote_decimals)?)?
            .checked_div(self.tick_size as u128)?
            .checked_div(self.quote_lot_size as u128)?
            .checked_div(pow10(self.base_decimals)?)
    }

    /// Exact (unrounded) number of base lots in `size` whole base units.
    pub fn base_units_to_exact_lots(&self, size: Ratio) -> Option<Ratio> {
        size.checked_mul(pow10(self.base_decimals)?)?
            .checked_div(self.base_lot_size as u128)
    }

    /// Exact (unrounded) number of quote lots in `size` whole quote units.
    pub fn quote_units_to_exact_lots(&self, size: Ratio) -> Option<Ratio> {
        size.checked_mul(pow10(self.quote_decimals)?)?
            .checked_div(self.quote_lot_size as u128)
    }

    // ========================================================================
    // Inverse conversions (lots/ticks -> whole units), for display
    // ========================================================================
    // Computed as exact ratios; `None` when the value is not representable
    // as a Decimal (more than 28 fractional digits) instead of a rounded one.

    /// Exact value of one tick in quote units per whole base unit
    pub fn exact_tick_value(&self) -> Option<Ratio> {
        Ratio::new(self.tick_size as u128, 1)?
            .checked_mul(self.quote_lot_size as u128)?
            .checked_mul(pow10(self.base_decimals)?)?
            .checked_div(self.base_lot_size as u128)?
            .checked_div(pow10(self.quote_decimals)?)
    }

    /// Value of one tick in quote units per whole base unit
    pub fn tick_value(&self) -> Option<Decimal> {
        self.exact_tick_value()?.to_decimal()
    }

    /// Price in quote units per base unit for a tick count
    pub fn ticks_to_price(&self, price_in_ticks: u64) -> Option<Decimal> {
        self.exact_tick_value()?
            .checked_mul(price_in_ticks as u128)?
            .to_decimal()
    }

    /// Whole base units in a number of base lots
    pub fn base_lots_to_base_units(&self, num_base_lots: u64) -> Option<Decimal> {
        Ratio::new(num_base_lots as u128, 1)?
            .checked_mul(self.base_lot_size as u128)?
            .checked_div(pow10(self.base_decimals)?)?
            .to_decimal()
    }

    /// Whole quote units in a number of quote lots
    pub fn quote_lots_to_quote_units(&self, num_quote_lots: u64) -> Option<Decimal> {
        Ratio::new(num_quote_lots as u128, 1)?
            .checked_mul(self.quote_lot_size as u128)?
            .checked_div(pow10(self.quote_decimals)?)?
            .to_decimal()
    }
}

/// Caller-supplied best prices on each side of the book.
///
/// The translator never reads live book state on its own; this snapshot
/// is only consulted to amend a non-rejecting post-only order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TopOfBook {
    pub best_bid_in_ticks: Option<u64>,
    pub best_ask_in_ticks: Option<u64>,
}

impl TopOfBook {
    pub fn new(best_bid_in_ticks: Option<u64>, best_ask_in_ticks: Option<u64>) -> Self {
        Self {
            best_bid_in_ticks,
            best_ask_in_ticks,
        }
    }

    /// Best resting price on `side`, if that side has orders
    pub fn best(&self, side: Side) -> Option<u64> {
        match side {
            Side::Bid => self.best_bid_in_ticks,
            Side::Ask => self.best_ask_in_ticks,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
