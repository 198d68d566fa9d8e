//! Per-variant translation rules.
//!
//! ## Order of checks
//!
//! 1. Required price present (Limit/PostOnly)
//! 2. Price and sizes quantized (input validity errors surface here)
//! 3. IOC size specification unambiguous
//! 4. Driving size nonzero after quantization
//! 5. IOC minimum fill within size
//! 6. Validity window resolved, defaults made explicit

use crate::config::{MarketOrderMinFill, TranslatorConfig};
use crate::error::{OrderKind, Result, SizeUnit, TranslationError};
use crate::translator::quantize::{quantize_base_size, quantize_price, quantize_quote_size};
use crate::types::{
    ImmediateOrCancelOrderTemplate, LimitOrderTemplate, MarketParameters, OrderRequest,
    PostOnlyOrderTemplate, Side, TopOfBook,
};
use crate::validity::resolve_validity_window;

// ============================================================================
// Limit
// ============================================================================

pub(crate) fn translate_limit(
    template: &LimitOrderTemplate,
    market: &MarketParameters,
) -> Result<OrderRequest> {
    let price = template
        .price_as_float
        .ok_or(TranslationError::PriceRequiredForLimitOrder {
            kind: OrderKind::Limit,
        })?;
    let price_in_ticks = quantize_price(template.side, price, market)?;
    let num_base_lots =
        quantize_base_size("size_in_base_units", template.size_in_base_units, market)?;
    require_nonzero(
        num_base_lots,
        "size_in_base_units",
        SizeUnit::Base,
        template.size_in_base_units,
    )?;

    Ok(OrderRequest::Limit {
        side: template.side,
        price_in_ticks,
        num_base_lots,
        self_trade_behavior: template.self_trade_behavior,
        match_limit: template.match_limit,
        client_order_id: template.client_order_id,
        use_only_deposited_funds: template.use_only_deposited_funds,
        validity: resolve_validity_window(
            template.last_valid_slot,
            template.last_valid_unix_timestamp_in_seconds,
        ),
    })
}

// ============================================================================
// PostOnly
// ============================================================================

pub(crate) fn translate_post_only(
    template: &PostOnlyOrderTemplate,
    market: &MarketParameters,
    top_of_book: Option<&TopOfBook>,
) -> Result<OrderRequest> {
    let price = template
        .price_as_float
        .ok_or(TranslationError::PriceRequiredForLimitOrder {
            kind: OrderKind::PostOnly,
        })?;
    let mut price_in_ticks = quantize_price(template.side, price, market)?;
    let num_base_lots =
        quantize_base_size("size_in_base_units", template.size_in_base_units, market)?;
    require_nonzero(
        num_base_lots,
        "size_in_base_units",
        SizeUnit::Base,
        template.size_in_base_units,
    )?;

    // Rejecting post-only orders keep the literal price; crossing is the
    // engine's call.
    if !template.reject_post_only {
        if let Some(top) = top_of_book {
            price_in_ticks = amend_to_non_crossing(template.side, price_in_ticks, top)?;
        }
    }

    Ok(OrderRequest::PostOnly {
        side: template.side,
        price_in_ticks,
        num_base_lots,
        client_order_id: template.client_order_id,
        reject_post_only: template.reject_post_only,
        use_only_deposited_funds: template.use_only_deposited_funds,
        validity: resolve_validity_window(
            template.last_valid_slot,
            template.last_valid_unix_timestamp_in_seconds,
        ),
    })
}

/// Move a post-only price to the best tick that does not cross `top`.
///
/// A bid at or above the best ask becomes `best_ask - 1`; an ask at or
/// below the best bid becomes `best_bid + 1`. Non-crossing prices are
/// returned unchanged.
pub fn amend_to_non_crossing(side: Side, price_in_ticks: u64, top: &TopOfBook) -> Result<u64> {
    let Some(opposite_best) = top.best(side.opposite()) else {
        return Ok(price_in_ticks);
    };
    let cannot_rest = TranslationError::PostOnlyCannotRest {
        side,
        opposite_best_in_ticks: opposite_best,
    };
    match side {
        Side::Bid if price_in_ticks >= opposite_best => match opposite_best.checked_sub(1) {
            Some(0) | None => Err(cannot_rest),
            Some(amended) => Ok(amended),
        },
        Side::Ask if price_in_ticks <= opposite_best => {
            opposite_best.checked_add(1).ok_or(cannot_rest)
        }
        _ => Ok(price_in_ticks),
    }
}

// ============================================================================
// ImmediateOrCancel
// ============================================================================

pub(crate) fn translate_immediate_or_cancel(
    template: &ImmediateOrCancelOrderTemplate,
    market: &MarketParameters,
    config: &TranslatorConfig,
) -> Result<OrderRequest> {
    let price_in_ticks = template
        .price_as_float
        .map(|price| quantize_price(template.side, price, market))
        .transpose()?;

    let num_base_lots =
        quantize_base_size("size_in_base_units", template.size_in_base_units, market)?;
    let num_quote_lots =
        quantize_quote_size("size_in_quote_units", template.size_in_quote_units, market)?;
    let mut min_base_lots_to_fill = quantize_base_size(
        "min_base_units_to_fill",
        template.min_base_units_to_fill,
        market,
    )?;
    let mut min_quote_lots_to_fill = quantize_quote_size(
        "min_quote_units_to_fill",
        template.min_quote_units_to_fill,
        market,
    )?;

    let active = match (
        template.size_in_base_units != 0.0,
        template.size_in_quote_units != 0.0,
    ) {
        (true, false) => SizeUnit::Base,
        (false, true) => SizeUnit::Quote,
        _ => {
            return Err(TranslationError::AmbiguousSizeSpecification {
                base: template.size_in_base_units,
                quote: template.size_in_quote_units,
            })
        }
    };

    // Only the active unit is checked against the minimum; the other
    // minimum is a secondary floor the engine enforces.
    let (size_lots, min_lots) = match active {
        SizeUnit::Base => {
            require_nonzero(
                num_base_lots,
                "size_in_base_units",
                SizeUnit::Base,
                template.size_in_base_units,
            )?;
            (num_base_lots, &mut min_base_lots_to_fill)
        }
        SizeUnit::Quote => {
            require_nonzero(
                num_quote_lots,
                "size_in_quote_units",
                SizeUnit::Quote,
                template.size_in_quote_units,
            )?;
            (num_quote_lots, &mut min_quote_lots_to_fill)
        }
    };

    if *min_lots > size_lots {
        return Err(TranslationError::InvalidMinimumFill {
            unit: active,
            min_lots: *min_lots,
            size_lots,
        });
    }

    if price_in_ticks.is_none()
        && *min_lots == 0
        && config.market_order_min_fill == MarketOrderMinFill::RequireAnyFill
    {
        *min_lots = 1;
    }

    Ok(OrderRequest::ImmediateOrCancel {
        side: template.side,
        price_in_ticks,
        num_base_lots,
        num_quote_lots,
        min_base_lots_to_fill,
        min_quote_lots_to_fill,
        self_trade_behavior: template.self_trade_behavior,
        match_limit: template.match_limit,
        client_order_id: template.client_order_id,
        use_only_deposited_funds: template.use_only_deposited_funds,
        validity: resolve_validity_window(
            template.last_valid_slot,
            template.last_valid_unix_timestamp_in_seconds,
        ),
    })
}

fn require_nonzero(lots: u64, field: &'static str, unit: SizeUnit, requested: f64) -> Result<()> {
    if lots == 0 {
        return Err(TranslationError::ZeroSizeOrder {
            field,
            unit,
            requested,
        });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
