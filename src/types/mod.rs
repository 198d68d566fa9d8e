//! Core data types for order translation
//!
//! ## Types
//!
//! - [`MarketParameters`]: lot/tick/decimals snapshot of one market
//! - [`Side`], [`SelfTradeBehavior`]: order enums
//! - [`OrderTemplate`]: caller intent in human units (three variants)
//! - [`OrderRequest`]: validated, lot-denominated output
//! - [`RequestRecord`]: SSZ record behind request digests
//!
//! ## Exact Arithmetic
//!
//! Floats are converted to exact rationals at the boundary
//! ([`quantity`]); all rounding after that is an explicit floor/ceiling.

mod market;
mod record;
mod request;
mod side;
mod template;
pub mod quantity;

// Re-export all types at module level
pub use market::{MarketParameters, TopOfBook};
pub use record::RequestRecord;
pub use request::OrderRequest;
pub use side::{SelfTradeBehavior, Side};
pub use template::{
    ImmediateOrCancelOrderTemplate, LimitOrderTemplate, OrderTemplate, PostOnlyOrderTemplate,
};
