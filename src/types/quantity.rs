//! Exact quantity arithmetic.
//!
//! ## Overview
//!
//! Human-facing prices and sizes arrive as `f64`. They are converted
//! exactly once, at the boundary, using the float's shortest round-trip
//! representation (`25.0037` stays `25.0037`, not
//! `25.00369999999999848...`). The digits of that string become a `u128`
//! mantissa over `10^scale`, with no cap on the number of fractional
//! digits, so `1.2345678901234567e-15` keeps all 31 of them. Values that
//! need more than 38 decimal digits of scale, or a mantissa beyond `u128`,
//! are refused rather than rounded. From there on everything is an exact
//! rational over `u128`, and the only rounding is the final, explicit
//! floor or ceiling.
//!
//! `Decimal` is used only for display ([`Ratio::to_decimal`]), and only
//! when the value fits its 28 fractional digits exactly.
//!
//! ## Rounding contract
//!
//! - Sizes always round down ([`Ratio::floor`]): an order never grows.
//! - Prices round by side ([`round_price_to_ticks`]): bids down, asks up,
//!   so quantization never makes an order more aggressive than intended.
//!
//! ## Examples
//!
//! ```
//! use order_translator::types::quantity::{float_to_decimal, Ratio};
//!
//! let d = float_to_decimal(25.0037).unwrap();
//! assert_eq!(d.to_string(), "25.0037");
//!
//! let ticks = Ratio::from_float(25.0037).unwrap().checked_mul(1_000).unwrap();
//! assert_eq!(ticks.floor(), 25_003);
//! assert_eq!(ticks.ceil(), 25_004);
//! ```

use rust_decimal::Decimal;

use crate::types::Side;

/// Largest `base_decimals` / `quote_decimals` accepted.
///
/// 10^18 keeps every intermediate product comfortably inside `u128`
/// for realistic lot sizes.
pub const MAX_DECIMALS: u32 = 18;

/// Fractional digits a `Decimal` can hold
const DECIMAL_MAX_SCALE: u32 = 28;

// ============================================================================
// Boundary conversions
// ============================================================================

/// Convert a float to the Decimal its shortest round-trip representation
/// names
///
/// # Returns
///
/// * `Some(Decimal)` - The decimal the caller meant
/// * `None` - If the value is NaN, infinite, negative, or needs more
///   precision than Decimal holds
pub fn float_to_decimal(value: f64) -> Option<Decimal> {
    Ratio::from_float(value)?.to_decimal()
}

/// `10^exp` as u128
pub fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// Split a plain decimal string ("25.0037", "0.0000015") into an integer
/// mantissa and a base-10 scale.
fn parse_plain_decimal(s: &str) -> Option<(u128, u32)> {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    let frac_part = frac_part.trim_end_matches('0');
    if int_part.is_empty() {
        return None;
    }

    let mut mantissa: u128 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
        if !b.is_ascii_digit() {
            return None;
        }
        mantissa = mantissa
            .checked_mul(10)?
            .checked_add(u128::from(b - b'0'))?;
    }
    let scale = u32::try_from(frac_part.len()).ok()?;
    Some((mantissa, scale))
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// ============================================================================
// Ratio
// ============================================================================

/// A non-negative exact rational `numerator / denominator`.
///
/// Kept reduced after every operation so intermediate products stay small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numerator: u128,
    denominator: u128,
}

impl Ratio {
    /// Build a reduced ratio. `None` if the denominator is zero.
    pub fn new(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let g = gcd(numerator, denominator);
        Some(Self {
            numerator: numerator / g,
            denominator: denominator / g,
        })
    }

    /// Exact ratio of a non-negative Decimal
    pub fn from_decimal(d: Decimal) -> Option<Self> {
        if d.is_sign_negative() && !d.is_zero() {
            return None;
        }
        Self::new(d.mantissa().unsigned_abs(), pow10(d.scale())?)
    }

    /// Exact ratio of the shortest round-trip representation of a
    /// non-negative finite float.
    ///
    /// `None` for NaN, infinities, negatives, and values whose digits do
    /// not fit a `u128` mantissa over `10^38` (subnormals, `1e300`).
    pub fn from_float(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        if value == 0.0 {
            // Also covers -0.0, which displays as "-0"
            return Self::new(0, 1);
        }
        // f64's Display never uses exponent notation and prints the
        // shortest string that parses back to the same float.
        let (mantissa, scale) = parse_plain_decimal(&value.to_string())?;
        Self::new(mantissa, pow10(scale)?)
    }

    /// The exact Decimal value, normalized.
    ///
    /// `None` if the ratio is not a terminating decimal within 28
    /// fractional digits, or its mantissa exceeds Decimal's 96 bits.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let scale = (0..=DECIMAL_MAX_SCALE)
            .find(|&k| pow10(k).is_some_and(|p| p % self.denominator == 0))?;
        let factor = pow10(scale)? / self.denominator;
        let mantissa = i128::try_from(self.numerator.checked_mul(factor)?).ok()?;
        Decimal::try_from_i128_with_scale(mantissa, scale)
            .ok()
            .map(|d| d.normalize())
    }

    pub fn numerator(&self) -> u128 {
        self.numerator
    }

    pub fn denominator(&self) -> u128 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// `self * factor`, `None` on overflow
    pub fn checked_mul(self, factor: u128) -> Option<Self> {
        let g = gcd(factor, self.denominator);
        Some(Self {
            numerator: self.numerator.checked_mul(factor / g)?,
            denominator: self.denominator / g,
        })
    }

    /// `self / divisor`, `None` on a zero divisor or overflow
    pub fn checked_div(self, divisor: u128) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        let g = gcd(self.numerator, divisor);
        Some(Self {
            numerator: self.numerator / g,
            denominator: self.denominator.checked_mul(divisor / g)?,
        })
    }

    /// Largest integer `<= self`
    pub fn floor(&self) -> u128 {
        self.numerator / self.denominator
    }

    /// Smallest integer `>= self`
    pub fn ceil(&self) -> u128 {
        self.numerator.div_ceil(self.denominator)
    }

    /// True if the ratio is a whole number
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Quantize an exact price-in-ticks to an integer tick for `side`.
///
/// Bids round down (never pay more than intended), asks round up (never
/// sell for less than intended). Getting this backwards makes an order
/// cross or rest at the wrong price.
pub fn round_price_to_ticks(side: Side, exact_ticks: Ratio) -> u128 {
    match side {
        Side::Bid => exact_ticks.floor(),
        Side::Ask => exact_ticks.ceil(),
    }
}

/// Quantize an exact lot count. Always rounds down.
pub fn round_lots(exact_lots: Ratio) -> u128 {
    exact_lots.floor()
}

// ============================================================================
// Unit Tests
// ============================================================================
