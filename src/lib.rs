//! # Order Translator
//!
//! Exact translation of human-facing order parameters into the lot/tick
//! representation of an on-chain central limit order book.
//!
//! ## Architecture
//!
//! - **Types**: market parameters, order templates, order requests
//! - **Translator**: template + market -> validated request
//! - **Validity**: collapses optional slot/timestamp expiry into one window
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs produce bit-identical requests
//! 2. **No Floating Point Math**: floats are converted once, exactly, then
//!    everything is integer/rational arithmetic
//! 3. **Directional Rounding**: bids round down, asks round up, sizes
//!    always round down
//! 4. **No I/O**: transport, market loading and wire encoding are the
//!    caller's concern

// ============================================================================
// Module declarations
// ============================================================================

/// Translator configuration
pub mod config;

/// Error taxonomy
pub mod error;

/// Core data types: MarketParameters, OrderTemplate, OrderRequest
pub mod types;

/// Template -> request translation
pub mod translator;

/// Expiry resolution
pub mod validity;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{MarketOrderMinFill, TranslatorConfig};
pub use error::{OrderKind, SizeUnit, TranslationError};
pub use translator::{translate, Translator};
pub use types::{
    ImmediateOrCancelOrderTemplate, LimitOrderTemplate, MarketParameters, OrderRequest,
    OrderTemplate, PostOnlyOrderTemplate, SelfTradeBehavior, Side, TopOfBook,
};
pub use validity::{resolve_validity_window, ValidityWindow};
