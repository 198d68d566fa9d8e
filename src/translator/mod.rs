//! Order template translator.
//!
//! ## Design Principles
//!
//! 1. **Pure**: output depends only on (template, market, config)
//! 2. **Exact**: floats become exact rationals at the boundary
//! 3. **Directional rounding**: bids down, asks up, sizes always down
//! 4. **Typed failures**: no partial results
//!
//! The translator holds no mutable state and caches nothing between
//! calls, so one instance can be shared freely across threads.
//!
//! ## Example
//!
//! ```
//! use order_translator::translator::Translator;
//! use order_translator::types::{LimitOrderTemplate, MarketParameters, OrderTemplate, Side};
//!
//! let market = MarketParameters::new(1_000_000, 100, 10, 6, 6);
//! let template: OrderTemplate = LimitOrderTemplate::new(Side::Bid, 25.0037, 1.5).into();
//!
//! let request = Translator::default().translate(&template, &market).unwrap();
//! assert_eq!(request.price_in_ticks(), Some(25_003));
//! assert_eq!(request.num_base_lots(), 1);
//! ```

pub mod quantize;
mod rules;

pub use rules::amend_to_non_crossing;

use tracing::{debug, warn};

use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::types::{MarketParameters, OrderRequest, OrderTemplate, TopOfBook};

/// Converts order templates into lot-denominated order requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate one template against one market snapshot.
    pub fn translate(
        &self,
        template: &OrderTemplate,
        market: &MarketParameters,
    ) -> Result<OrderRequest> {
        self.run(template, market, None)
    }

    /// Like [`translate`](Self::translate), but a non-rejecting post-only
    /// order is amended so it does not cross `top_of_book`.
    ///
    /// The snapshot is ignored for every other kind of order.
    pub fn translate_with_top_of_book(
        &self,
        template: &OrderTemplate,
        market: &MarketParameters,
        top_of_book: &TopOfBook,
    ) -> Result<OrderRequest> {
        self.run(template, market, Some(top_of_book))
    }

    fn run(
        &self,
        template: &OrderTemplate,
        market: &MarketParameters,
        top_of_book: Option<&TopOfBook>,
    ) -> Result<OrderRequest> {
        let result = market.validate().and_then(|()| match template {
            OrderTemplate::Limit(t) => rules::translate_limit(t, market),
            OrderTemplate::PostOnly(t) => rules::translate_post_only(t, market, top_of_book),
            OrderTemplate::ImmediateOrCancel(t) => {
                rules::translate_immediate_or_cancel(t, market, &self.config)
            }
        });

        match &result {
            Ok(request) => debug!(
                kind = %request.kind(),
                side = ?request.side(),
                client_order_id = %request.client_order_id(),
                price_in_ticks = ?request.price_in_ticks(),
                num_base_lots = request.num_base_lots(),
                validity = ?request.validity(),
                "translated order template"
            ),
            Err(e) => warn!(
                kind = %template.kind(),
                side = ?template.side(),
                client_order_id = %template.client_order_id(),
                parameter_error = e.is_parameter_error(),
                error = %e,
                "rejected order template"
            ),
        }

        result
    }
}

/// Translate with the default configuration.
pub fn translate(template: &OrderTemplate, market: &MarketParameters) -> Result<OrderRequest> {
    Translator::default().translate(template, market)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketOrderMinFill;
    use crate::error::TranslationError;
    use crate::types::{
        ImmediateOrCancelOrderTemplate, LimitOrderTemplate, PostOnlyOrderTemplate, Side,
    };

    fn market() -> MarketParameters {
        MarketParameters::new(1_000_000, 100, 10, 6, 6)
    }

    #[test]
    fn test_market_validated_before_template() {
        let mut bad = market();
        bad.quote_lot_size = 0;
        // Even an otherwise invalid template reports the market problem first
        let template: OrderTemplate = LimitOrderTemplate::new(Side::Bid, -1.0, 0.0).into();
        let err = translate(&template, &bad).unwrap_err();
        assert_eq!(
            err,
            TranslationError::NonPositiveMarketParameter {
                field: "quote_lot_size",
                value: 0,
            }
        );
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_dispatches_every_variant() {
        let templates: [OrderTemplate; 3] = [
            LimitOrderTemplate::new(Side::Bid, 25.0, 1.0).into(),
            PostOnlyOrderTemplate::new(Side::Ask, 25.0, 1.0).into(),
            ImmediateOrCancelOrderTemplate::market_sell(1.0).into(),
        ];
        for template in templates {
            let request = translate(&template, &market()).unwrap();
            assert_eq!(request.kind(), template.kind());
            assert_eq!(request.side(), template.side());
        }
    }

    #[test]
    fn test_top_of_book_only_affects_non_rejecting_post_only() {
        let top = TopOfBook::new(Some(24_000), Some(25_000));
        let translator = Translator::default();

        let limit: OrderTemplate = LimitOrderTemplate::new(Side::Bid, 30.0, 1.0).into();
        let request = translator
            .translate_with_top_of_book(&limit, &market(), &top)
            .unwrap();
        assert_eq!(request.price_in_ticks(), Some(30_000));

        let post: OrderTemplate = PostOnlyOrderTemplate::new(Side::Bid, 30.0, 1.0)
            .with_reject_post_only(false)
            .into();
        let request = translator
            .translate_with_top_of_book(&post, &market(), &top)
            .unwrap();
        assert_eq!(request.price_in_ticks(), Some(24_999));
    }

    #[test]
    fn test_config_is_used() {
        let translator = Translator::new(TranslatorConfig::new(MarketOrderMinFill::RequireAnyFill));
        assert_eq!(
            translator.config().market_order_min_fill,
            MarketOrderMinFill::RequireAnyFill
        );

        let template: OrderTemplate = ImmediateOrCancelOrderTemplate::market_sell(2.0).into();
        let request = translator.translate(&template, &market()).unwrap();
        assert!(matches!(
            request,
            OrderRequest::ImmediateOrCancel {
                min_base_lots_to_fill: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_deterministic() {
        let template: OrderTemplate =
            ImmediateOrCancelOrderTemplate::fill_or_kill(Side::Ask, 25.0037, 3.0)
                .with_last_valid_slot(7)
                .with_last_valid_unix_timestamp(1_700_000_000)
                .into();
        let a = translate(&template, &market()).unwrap();
        let b = translate(&template, &market()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }
}
