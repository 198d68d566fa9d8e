//! Order templates: what the caller wants, in human units.
//!
//! A template is built per order, handed to the translator once, and
//! dropped. Prices are quote units per whole base unit; sizes are whole
//! base (or quote) units. Nothing here is validated; that is the
//! translator's job.
//!
//! ## Example
//!
//! ```
//! use order_translator::types::{LimitOrderTemplate, SelfTradeBehavior, Side};
//!
//! let template = LimitOrderTemplate::new(Side::Bid, 25.0037, 1.5)
//!     .with_self_trade_behavior(SelfTradeBehavior::Abort)
//!     .with_client_order_id(7)
//!     .with_last_valid_slot(250_000_000);
//! assert_eq!(template.match_limit, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::OrderKind;
use crate::types::{SelfTradeBehavior, Side};

/// Setters shared by every template variant.
macro_rules! common_setters {
    ($template:ty) => {
        impl $template {
            /// Caller-assigned id, opaque to the translator
            #[must_use]
            pub fn with_client_order_id(mut self, client_order_id: u128) -> Self {
                self.client_order_id = client_order_id;
                self
            }

            /// Only use funds already deposited on the market
            #[must_use]
            pub fn with_use_only_deposited_funds(mut self, use_only_deposited_funds: bool) -> Self {
                self.use_only_deposited_funds = use_only_deposited_funds;
                self
            }

            #[must_use]
            pub fn with_last_valid_slot(mut self, slot: u64) -> Self {
                self.last_valid_slot = Some(slot);
                self
            }

            #[must_use]
            pub fn with_last_valid_unix_timestamp(mut self, unix_timestamp_in_seconds: i64) -> Self {
                self.last_valid_unix_timestamp_in_seconds = Some(unix_timestamp_in_seconds);
                self
            }
        }
    };
}

// ============================================================================
// Limit
// ============================================================================

/// A resting order that may take liquidity first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitOrderTemplate {
    pub side: Side,
    /// Required. `None` is rejected by the translator.
    pub price_as_float: Option<f64>,
    pub size_in_base_units: f64,
    pub self_trade_behavior: SelfTradeBehavior,
    /// Max number of resting orders to match against; `None` is unlimited
    pub match_limit: Option<u64>,
    pub client_order_id: u128,
    pub use_only_deposited_funds: bool,
    pub last_valid_slot: Option<u64>,
    pub last_valid_unix_timestamp_in_seconds: Option<i64>,
}

impl LimitOrderTemplate {
    pub fn new(side: Side, price_as_float: f64, size_in_base_units: f64) -> Self {
        Self {
            side,
            price_as_float: Some(price_as_float),
            size_in_base_units,
            self_trade_behavior: SelfTradeBehavior::default(),
            match_limit: None,
            client_order_id: 0,
            use_only_deposited_funds: false,
            last_valid_slot: None,
            last_valid_unix_timestamp_in_seconds: None,
        }
    }

    #[must_use]
    pub fn with_self_trade_behavior(mut self, self_trade_behavior: SelfTradeBehavior) -> Self {
        self.self_trade_behavior = self_trade_behavior;
        self
    }

    #[must_use]
    pub fn with_match_limit(mut self, match_limit: u64) -> Self {
        self.match_limit = Some(match_limit);
        self
    }
}

common_setters!(LimitOrderTemplate);

// ============================================================================
// PostOnly
// ============================================================================

/// An order that must never take liquidity.
///
/// No self-trade or match-limit fields: a post-only order never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostOnlyOrderTemplate {
    pub side: Side,
    /// Required. `None` is rejected by the translator.
    pub price_as_float: Option<f64>,
    pub size_in_base_units: f64,
    pub client_order_id: u128,
    /// `true`: the engine rejects a crossing order. `false`: the price is
    /// amended to the best non-crossing tick.
    pub reject_post_only: bool,
    pub use_only_deposited_funds: bool,
    pub last_valid_slot: Option<u64>,
    pub last_valid_unix_timestamp_in_seconds: Option<i64>,
}

impl PostOnlyOrderTemplate {
    pub fn new(side: Side, price_as_float: f64, size_in_base_units: f64) -> Self {
        Self {
            side,
            price_as_float: Some(price_as_float),
            size_in_base_units,
            client_order_id: 0,
            reject_post_only: true,
            use_only_deposited_funds: false,
            last_valid_slot: None,
            last_valid_unix_timestamp_in_seconds: None,
        }
    }

    #[must_use]
    pub fn with_reject_post_only(mut self, reject_post_only: bool) -> Self {
        self.reject_post_only = reject_post_only;
        self
    }
}

common_setters!(PostOnlyOrderTemplate);

// ============================================================================
// ImmediateOrCancel
// ============================================================================

/// A taking order; whatever does not fill immediately is cancelled.
///
/// Exactly one of `size_in_base_units` / `size_in_quote_units` must be
/// nonzero; it is the active size constraint. A missing price makes this a
/// market order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImmediateOrCancelOrderTemplate {
    pub side: Side,
    pub price_as_float: Option<f64>,
    pub size_in_base_units: f64,
    pub size_in_quote_units: f64,
    pub min_base_units_to_fill: f64,
    pub min_quote_units_to_fill: f64,
    pub self_trade_behavior: SelfTradeBehavior,
    pub match_limit: Option<u64>,
    pub client_order_id: u128,
    pub use_only_deposited_funds: bool,
    pub last_valid_slot: Option<u64>,
    pub last_valid_unix_timestamp_in_seconds: Option<i64>,
}

impl ImmediateOrCancelOrderTemplate {
    pub fn new(
        side: Side,
        price_as_float: Option<f64>,
        size_in_base_units: f64,
        size_in_quote_units: f64,
    ) -> Self {
        Self {
            side,
            price_as_float,
            size_in_base_units,
            size_in_quote_units,
            min_base_units_to_fill: 0.0,
            min_quote_units_to_fill: 0.0,
            self_trade_behavior: SelfTradeBehavior::default(),
            match_limit: None,
            client_order_id: 0,
            use_only_deposited_funds: false,
            last_valid_slot: None,
            last_valid_unix_timestamp_in_seconds: None,
        }
    }

    /// Sell `size_in_base_units` at any price
    pub fn market_sell(size_in_base_units: f64) -> Self {
        Self::new(Side::Ask, None, size_in_base_units, 0.0)
    }

    /// Spend up to `size_in_quote_units` buying at any price
    pub fn market_buy_with_quote_budget(size_in_quote_units: f64) -> Self {
        Self::new(Side::Bid, None, 0.0, size_in_quote_units)
    }

    /// Fill all of `size_in_base_units` at `price_as_float` or better, or nothing
    pub fn fill_or_kill(side: Side, price_as_float: f64, size_in_base_units: f64) -> Self {
        Self::new(side, Some(price_as_float), size_in_base_units, 0.0)
            .with_min_base_units_to_fill(size_in_base_units)
    }

    #[must_use]
    pub fn with_min_base_units_to_fill(mut self, min_base_units_to_fill: f64) -> Self {
        self.min_base_units_to_fill = min_base_units_to_fill;
        self
    }

    #[must_use]
    pub fn with_min_quote_units_to_fill(mut self, min_quote_units_to_fill: f64) -> Self {
        self.min_quote_units_to_fill = min_quote_units_to_fill;
        self
    }

    #[must_use]
    pub fn with_self_trade_behavior(mut self, self_trade_behavior: SelfTradeBehavior) -> Self {
        self.self_trade_behavior = self_trade_behavior;
        self
    }

    #[must_use]
    pub fn with_match_limit(mut self, match_limit: u64) -> Self {
        self.match_limit = Some(match_limit);
        self
    }
}

common_setters!(ImmediateOrCancelOrderTemplate);

// ============================================================================
// OrderTemplate
// ============================================================================

/// One of the three order intents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderTemplate {
    Limit(LimitOrderTemplate),
    PostOnly(PostOnlyOrderTemplate),
    ImmediateOrCancel(ImmediateOrCancelOrderTemplate),
}

impl OrderTemplate {
    pub fn kind(&self) -> OrderKind {
        match self {
            OrderTemplate::Limit(_) => OrderKind::Limit,
            OrderTemplate::PostOnly(_) => OrderKind::PostOnly,
            OrderTemplate::ImmediateOrCancel(_) => OrderKind::ImmediateOrCancel,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            OrderTemplate::Limit(t) => t.side,
            OrderTemplate::PostOnly(t) => t.side,
            OrderTemplate::ImmediateOrCancel(t) => t.side,
        }
    }

    pub fn client_order_id(&self) -> u128 {
        match self {
            OrderTemplate::Limit(t) => t.client_order_id,
            OrderTemplate::PostOnly(t) => t.client_order_id,
            OrderTemplate::ImmediateOrCancel(t) => t.client_order_id,
        }
    }
}

impl From<LimitOrderTemplate> for OrderTemplate {
    fn from(template: LimitOrderTemplate) -> Self {
        OrderTemplate::Limit(template)
    }
}

impl From<PostOnlyOrderTemplate> for OrderTemplate {
    fn from(template: PostOnlyOrderTemplate) -> Self {
        OrderTemplate::PostOnly(template)
    }
}

impl From<ImmediateOrCancelOrderTemplate> for OrderTemplate {
    fn from(template: ImmediateOrCancelOrderTemplate) -> Self {
        OrderTemplate::ImmediateOrCancel(template)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
