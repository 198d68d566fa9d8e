//! Configuration for the translator

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable selecting [`MarketOrderMinFill`]
pub const MARKET_MIN_FILL_ENV: &str = "ORDER_TRANSLATOR_MARKET_MIN_FILL";

/// How a market IOC (no price) with a zero minimum fill is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarketOrderMinFill {
    /// Zero means zero: the order may fill nothing
    #[default]
    NoFloor,
    /// Raise a zero minimum in the active size unit to one lot
    RequireAnyFill,
}

impl FromStr for MarketOrderMinFill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "nofloor" => Ok(MarketOrderMinFill::NoFloor),
            "requireanyfill" => Ok(MarketOrderMinFill::RequireAnyFill),
            _ => Err(format!(
                "Invalid market order min fill: {}. Use 'no-floor' or 'require-any-fill'",
                s
            )),
        }
    }
}

impl fmt::Display for MarketOrderMinFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketOrderMinFill::NoFloor => f.write_str("no-floor"),
            MarketOrderMinFill::RequireAnyFill => f.write_str("require-any-fill"),
        }
    }
}

/// Configuration for the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Minimum-fill policy for market IOC orders
    pub market_order_min_fill: MarketOrderMinFill,
}

impl TranslatorConfig {
    /// Create a new configuration using environment variables
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            market_order_min_fill: env::var(MARKET_MIN_FILL_ENV)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Create a new configuration with custom values
    pub fn new(market_order_min_fill: MarketOrderMinFill) -> Self {
        Self {
            market_order_min_fill,
        }
    }
}
