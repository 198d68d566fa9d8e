//! Order requests: validated, lot-denominated output of the translator.
//!
//! ## Digest
//!
//! [`OrderRequest::digest`] fingerprints a request by SSZ-encoding a flat,
//! fixed-size [`RequestRecord`] and hashing it with SHA-256. Identical
//! requests always produce identical digests, which makes them usable as
//! log correlation ids and for deduplication. The record is not the
//! instruction wire format; encoding for submission belongs to the
//! transport layer.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{OrderKind, TranslationError};
use crate::types::record::RequestRecord;
use crate::types::{SelfTradeBehavior, Side};
use crate::validity::ValidityWindow;

// ============================================================================
// OrderRequest
// ============================================================================

/// An order ready for the transport layer. Every default is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderRequest {
    Limit {
        side: Side,
        price_in_ticks: u64,
        num_base_lots: u64,
        self_trade_behavior: SelfTradeBehavior,
        match_limit: Option<u64>,
        client_order_id: u128,
        use_only_deposited_funds: bool,
        validity: ValidityWindow,
    },
    PostOnly {
        side: Side,
        price_in_ticks: u64,
        num_base_lots: u64,
        client_order_id: u128,
        reject_post_only: bool,
        use_only_deposited_funds: bool,
        validity: ValidityWindow,
    },
    ImmediateOrCancel {
        side: Side,
        /// `None` for a market order
        price_in_ticks: Option<u64>,
        num_base_lots: u64,
        num_quote_lots: u64,
        min_base_lots_to_fill: u64,
        min_quote_lots_to_fill: u64,
        self_trade_behavior: SelfTradeBehavior,
        match_limit: Option<u64>,
        client_order_id: u128,
        use_only_deposited_funds: bool,
        validity: ValidityWindow,
    },
}

impl OrderRequest {
    pub fn kind(&self) -> OrderKind {
        match self {
            OrderRequest::Limit { .. } => OrderKind::Limit,
            OrderRequest::PostOnly { .. } => OrderKind::PostOnly,
            OrderRequest::ImmediateOrCancel { .. } => OrderKind::ImmediateOrCancel,
        }
    }

    pub fn side(&self) -> Side {
        match *self {
            OrderRequest::Limit { side, .. }
            | OrderRequest::PostOnly { side, .. }
            | OrderRequest::ImmediateOrCancel { side, .. } => side,
        }
    }

    /// Limit price in ticks; `None` only for IOC market orders
    pub fn price_in_ticks(&self) -> Option<u64> {
        match *self {
            OrderRequest::Limit { price_in_ticks, .. }
            | OrderRequest::PostOnly { price_in_ticks, .. } => Some(price_in_ticks),
            OrderRequest::ImmediateOrCancel { price_in_ticks, .. } => price_in_ticks,
        }
    }

    pub fn num_base_lots(&self) -> u64 {
        match *self {
            OrderRequest::Limit { num_base_lots, .. }
            | OrderRequest::PostOnly { num_base_lots, .. }
            | OrderRequest::ImmediateOrCancel { num_base_lots, .. } => num_base_lots,
        }
    }

    pub fn client_order_id(&self) -> u128 {
        match *self {
            OrderRequest::Limit {
                client_order_id, ..
            }
            | OrderRequest::PostOnly {
                client_order_id, ..
            }
            | OrderRequest::ImmediateOrCancel {
                client_order_id, ..
            } => client_order_id,
        }
    }

    pub fn validity(&self) -> ValidityWindow {
        match *self {
            OrderRequest::Limit { validity, .. }
            | OrderRequest::PostOnly { validity, .. }
            | OrderRequest::ImmediateOrCancel { validity, .. } => validity,
        }
    }

    /// IOC without a limit price
    pub fn is_market_order(&self) -> bool {
        matches!(
            self,
            OrderRequest::ImmediateOrCancel {
                price_in_ticks: None,
                ..
            }
        )
    }

    /// IOC whose minimum fill equals its full size in the active unit.
    ///
    /// Informational only; a fill-or-kill is still an IOC request.
    pub fn is_fill_or_kill(&self) -> bool {
        match *self {
            OrderRequest::ImmediateOrCancel {
                num_base_lots,
                num_quote_lots,
                min_base_lots_to_fill,
                min_quote_lots_to_fill,
                ..
            } => {
                if num_base_lots > 0 {
                    min_base_lots_to_fill == num_base_lots
                } else {
                    num_quote_lots > 0 && min_quote_lots_to_fill == num_quote_lots
                }
            }
            _ => false,
        }
    }

    /// Flatten into the fixed-size digest record
    pub fn to_record(&self) -> RequestRecord {
        let mut record = RequestRecord {
            kind_raw: self.kind().to_u8(),
            side_raw: self.side().to_u8(),
            has_price: self.price_in_ticks().is_some(),
            price_in_ticks: self.price_in_ticks().unwrap_or_default(),
            num_base_lots: self.num_base_lots(),
            ..RequestRecord::default()
        };

        let client_order_id = self.client_order_id();
        record.client_order_id_hi = (client_order_id >> 64) as u64;
        record.client_order_id_lo = client_order_id as u64;

        let validity = self.validity();
        record.validity_raw = validity.to_u8();
        record.last_valid_slot = validity.last_valid_slot().unwrap_or_default();
        // Two's complement bits; SSZ has no signed integers
        record.last_valid_unix_timestamp =
            validity.last_valid_unix_timestamp().unwrap_or_default() as u64;

        match *self {
            OrderRequest::Limit {
                self_trade_behavior,
                match_limit,
                use_only_deposited_funds,
                ..
            } => {
                record.self_trade_behavior_raw = self_trade_behavior.to_u8();
                record.has_match_limit = match_limit.is_some();
                record.match_limit = match_limit.unwrap_or_default();
                record.use_only_deposited_funds = use_only_deposited_funds;
            }
            OrderRequest::PostOnly {
                reject_post_only,
                use_only_deposited_funds,
                ..
            } => {
                record.reject_post_only = reject_post_only;
                record.use_only_deposited_funds = use_only_deposited_funds;
            }
            OrderRequest::ImmediateOrCancel {
                num_quote_lots,
                min_base_lots_to_fill,
                min_quote_lots_to_fill,
                self_trade_behavior,
                match_limit,
                use_only_deposited_funds,
                ..
            } => {
                record.num_quote_lots = num_quote_lots;
                record.min_base_lots_to_fill = min_base_lots_to_fill;
                record.min_quote_lots_to_fill = min_quote_lots_to_fill;
                record.self_trade_behavior_raw = self_trade_behavior.to_u8();
                record.has_match_limit = match_limit.is_some();
                record.match_limit = match_limit.unwrap_or_default();
                record.use_only_deposited_funds = use_only_deposited_funds;
            }
        }

        record
    }

    /// SHA-256 of the SSZ-encoded [`RequestRecord`]
    pub fn digest(&self) -> Result<[u8; 32], TranslationError> {
        let bytes = ssz_rs::serialize(&self.to_record())
            .map_err(|e| TranslationError::Encoding(format!("{:?}", e)))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Ok(hash)
    }

    /// Digest as a hex string
    pub fn digest_hex(&self) -> Result<String, TranslationError> {
        self.digest().map(hex::encode)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
