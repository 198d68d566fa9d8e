//! Error types for order translation.
//!
//! Every failure is a local validation failure: translating the same
//! template against the same market always reproduces the same error, so
//! nothing here is retryable. Variants carry the offending field and the
//! computed value so callers can fix the template without digging into
//! the arithmetic.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::Side;

/// Which order-intent variant a template or request is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderKind {
    Limit,
    PostOnly,
    ImmediateOrCancel,
}

impl OrderKind {
    /// Convert to u8 for the digest record
    pub fn to_u8(self) -> u8 {
        match self {
            OrderKind::Limit => 0,
            OrderKind::PostOnly => 1,
            OrderKind::ImmediateOrCancel => 2,
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderKind::Limit => "limit",
            OrderKind::PostOnly => "post-only",
            OrderKind::ImmediateOrCancel => "immediate-or-cancel",
        };
        f.write_str(name)
    }
}

/// Unit a size or minimum-fill is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeUnit {
    Base,
    Quote,
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeUnit::Base => f.write_str("base"),
            SizeUnit::Quote => f.write_str("quote"),
        }
    }
}

/// Translation error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslationError {
    /// The driving size is smaller than one lot
    #[error("{field} = {requested} quantizes to zero {unit} lots")]
    ZeroSizeOrder {
        field: &'static str,
        unit: SizeUnit,
        requested: f64,
    },

    /// An IOC minimum fill asks for more than the order offers
    #[error("minimum fill of {min_lots} {unit} lots exceeds order size of {size_lots} {unit} lots")]
    InvalidMinimumFill {
        unit: SizeUnit,
        min_lots: u64,
        size_lots: u64,
    },

    /// IOC with both or neither of base/quote size set
    #[error(
        "exactly one of size_in_base_units ({base}) or size_in_quote_units ({quote}) must be nonzero"
    )]
    AmbiguousSizeSpecification { base: f64, quote: f64 },

    /// Limit/PostOnly without a price
    #[error("{kind} orders require a price")]
    PriceRequiredForLimitOrder { kind: OrderKind },

    /// MarketParameters violates its positivity invariant
    #[error("market parameter `{field}` must be positive (got {value})")]
    NonPositiveMarketParameter { field: &'static str, value: u64 },

    /// Decimals too large for exact integer scaling
    #[error("market parameter `{field}` = {value} exceeds the supported maximum of {max}")]
    UnsupportedDecimals {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("invalid price {price}: {reason}")]
    InvalidPrice { price: f64, reason: &'static str },

    #[error("invalid {field} {value}: {reason}")]
    InvalidSize {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("arithmetic overflow while computing {quantity}")]
    ArithmeticOverflow { quantity: &'static str },

    /// A post-only order has no non-crossing tick on its side
    #[error("post-only {side:?} has no non-crossing price (opposite best at {opposite_best_in_ticks} ticks)")]
    PostOnlyCannotRest {
        side: Side,
        opposite_best_in_ticks: u64,
    },

    /// Digest record could not be encoded
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl TranslationError {
    /// True when the error points at a misconfigured `MarketParameters`
    /// rather than at the template. Callers should treat these as fatal.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            TranslationError::NonPositiveMarketParameter { .. }
                | TranslationError::UnsupportedDecimals { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TranslationError>;
