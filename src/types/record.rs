//! Fixed-size record used to fingerprint order requests.
//!
//! ## SSZ Serialization
//!
//! The record derives `SimpleSerialize` from ssz_rs so the same request
//! always encodes to the same bytes:
//! - Basic types (u64, u8, bool): direct little-endian encoding
//! - Fixed-size container: concatenated fields, no offsets

use ssz_rs::prelude::*;

// ============================================================================
// RequestRecord
// ============================================================================

/// Flat, fixed-size view of an [`OrderRequest`](crate::types::OrderRequest) used for digests.
///
/// ## SSZ Layout
///
/// Fixed-size container of 88 bytes. Optional values are stored as a
/// presence flag plus a zeroed value.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RequestRecord {
    /// 0=Limit, 1=PostOnly, 2=ImmediateOrCancel
    pub kind_raw: u8,
    /// 0=Bid, 1=Ask
    pub side_raw: u8,
    pub has_price: bool,
    pub price_in_ticks: u64,
    pub num_base_lots: u64,
    pub num_quote_lots: u64,
    pub min_base_lots_to_fill: u64,
    pub min_quote_lots_to_fill: u64,
    pub self_trade_behavior_raw: u8,
    pub has_match_limit: bool,
    pub match_limit: u64,
    pub client_order_id_hi: u64,
    pub client_order_id_lo: u64,
    pub reject_post_only: bool,
    pub use_only_deposited_funds: bool,
    /// See [`ValidityWindow::to_u8`](crate::validity::ValidityWindow::to_u8)
    pub validity_raw: u8,
    pub last_valid_slot: u64,
    pub last_valid_unix_timestamp: u64,
}
