//! Order side and self-trade policy.
//!
//! Both enums carry a stable `u8` tag so they can be packed into the
//! fixed-size digest record (see [`crate::types::request`]).

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid or Ask
///
/// Represented as u8 in the digest record:
/// - Bid = 0
/// - Ask = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Bid - wants to buy base with quote
    #[default]
    Bid,
    /// Ask - wants to sell base for quote
    Ask,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    /// The side whose resting orders this side trades against
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bid" | "buy" => Ok(Side::Bid),
            "ask" | "sell" => Ok(Side::Ask),
            _ => Err(format!("Invalid side: {}. Use 'bid' or 'ask'", s)),
        }
    }
}

// ============================================================================
// SelfTradeBehavior enum
// ============================================================================

/// What the engine does when an order would match the same trader's
/// resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelfTradeBehavior {
    /// Fail the whole order
    Abort,
    /// Cancel the resting (providing) order and keep matching
    #[default]
    CancelProvide,
    /// Cancel the incoming (taking) remainder
    CancelTake,
}

impl SelfTradeBehavior {
    pub fn to_u8(self) -> u8 {
        match self {
            SelfTradeBehavior::Abort => 0,
            SelfTradeBehavior::CancelProvide => 1,
            SelfTradeBehavior::CancelTake => 2,
        }
    }
}

impl std::str::FromStr for SelfTradeBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "abort" => Ok(SelfTradeBehavior::Abort),
            "cancelprovide" => Ok(SelfTradeBehavior::CancelProvide),
            "canceltake" => Ok(SelfTradeBehavior::CancelTake),
            _ => Err(format!(
                "Invalid self-trade behavior: {}. Use 'abort', 'cancel-provide' or 'cancel-take'",
                s
            )),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
