//! Property tests for the order translator.
//!
//! These tests verify:
//! 1. Bid prices floor and ask prices ceil onto the tick grid
//! 2. Sizes floor onto the lot grid and zero-lot orders are rejected
//! 3. The validity window resolver is total over its four inputs
//! 4. IOC minimum fills never exceed the order's own size
//! 5. Translation is deterministic, including across threads
//!
//! Inputs come from a seeded RNG, so every run checks the same cases.
//!
//! ```bash
//! cargo test --test translation_properties
//! ```

use order_translator::types::quantity::{float_to_decimal, Ratio};
use order_translator::{
    translate, ImmediateOrCancelOrderTemplate, LimitOrderTemplate, MarketParameters,
    OrderRequest, OrderTemplate, PostOnlyOrderTemplate, SelfTradeBehavior, Side, SizeUnit,
    TopOfBook, TranslationError, Translator, ValidityWindow,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Cases per property
const CASES: usize = 2_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// The market from the worked example: 1 lot per base unit, 0.001 tick.
fn example_market() -> MarketParameters {
    MarketParameters::new(1_000_000, 100, 10, 6, 6)
}

/// Markets with different tick values and lot granularities.
fn markets() -> Vec<MarketParameters> {
    vec![
        // tick = 0.001, 1 lot per unit
        example_market(),
        // tick = 0.1, 10_000 lots per unit
        MarketParameters::new(100_000, 10, 1, 9, 6),
        // tick = 0.01, 1 lot per unit, no decimals on base
        MarketParameters::new(1, 1, 1, 0, 2),
        // tick = 0.001, 1000 lots per unit
        MarketParameters::new(1_000_000, 1, 1, 9, 6),
    ]
}

/// A price with a short decimal expansion, or an arbitrary float.
fn random_price(rng: &mut ChaCha8Rng) -> f64 {
    if rng.gen_bool(0.5) {
        rng.gen_range(1_000u64..100_000_000) as f64 / 10_000.0
    } else {
        rng.gen_range(0.1f64..10_000.0)
    }
}

fn random_side(rng: &mut ChaCha8Rng) -> Side {
    if rng.gen_bool(0.5) {
        Side::Bid
    } else {
        Side::Ask
    }
}

fn decimal(value: f64) -> Decimal {
    float_to_decimal(value).expect("test values are finite")
}

fn pow10(exp: u32) -> Decimal {
    Decimal::from(10u64.pow(exp))
}

// ============================================================================
// PRICE ROUNDING
// ============================================================================

#[test]
fn bid_floors_and_ask_ceils_to_tick_grid() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for market in markets() {
        let tick_value = market.tick_value().expect("valid market");

        for _ in 0..CASES {
            let price = random_price(&mut rng);
            let side = random_side(&mut rng);
            let template: OrderTemplate = LimitOrderTemplate::new(side, price, 1_000.0).into();

            let request = translate(&template, &market).expect("valid template");
            let ticks = Decimal::from(request.price_in_ticks().expect("limit has a price"));
            let exact = decimal(price);

            match side {
                Side::Bid => {
                    assert!(ticks * tick_value <= exact, "bid {} rounded up", price);
                    assert!(exact < (ticks + Decimal::ONE) * tick_value, "bid {} not floor", price);
                }
                Side::Ask => {
                    assert!(ticks * tick_value >= exact, "ask {} rounded down", price);
                    assert!(exact > (ticks - Decimal::ONE) * tick_value, "ask {} not ceil", price);
                }
            }
        }
    }
}

/// Exact floor and ceiling of `price * 10^shift`, from the float's
/// scientific-notation digits.
fn scaled_floor_ceil(price: f64, shift: i32) -> (u128, u128) {
    let formatted = format!("{:e}", price);
    let (mantissa, exponent) = formatted.split_once('e').unwrap();
    let frac_len = mantissa.split_once('.').map_or(0, |(_, f)| f.len()) as i32;
    let digits: u128 = mantissa.replace('.', "").parse().unwrap();
    let k = exponent.parse::<i32>().unwrap() - frac_len + shift;
    if k >= 0 {
        let value = digits * 10u128.pow(k as u32);
        (value, value)
    } else {
        let divisor = 10u128.pow((-k) as u32);
        (digits / divisor, digits.div_ceil(divisor))
    }
}

#[test]
fn price_rounding_is_exact_at_max_decimals() {
    let mut rng = ChaCha8Rng::seed_from_u64(18);
    // tick = 1e-28: finer than a Decimal can carry through a float parse
    let market = MarketParameters::new(10_000_000_000, 1, 1, 0, 18);

    for _ in 0..CASES {
        let price = rng.gen_range(1.0f64..10.0) * 10f64.powi(-rng.gen_range(10..20));
        let side = random_side(&mut rng);
        let template: OrderTemplate = LimitOrderTemplate::new(side, price, 1e10).into();

        let request = translate(&template, &market).expect("valid template");
        let ticks = u128::from(request.price_in_ticks().unwrap());
        let (floor, ceil) = scaled_floor_ceil(price, 28);

        match side {
            Side::Bid => assert_eq!(ticks, floor, "bid {:e}", price),
            Side::Ask => assert_eq!(ticks, ceil, "ask {:e}", price),
        }
        assert_eq!(request.num_base_lots(), 1);
    }
}

#[test]
fn bid_never_above_ask_for_same_price() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let market = example_market();

    for _ in 0..CASES {
        let price = random_price(&mut rng);
        let bid = translate(&LimitOrderTemplate::new(Side::Bid, price, 1.0).into(), &market)
            .unwrap()
            .price_in_ticks()
            .unwrap();
        let ask = translate(&LimitOrderTemplate::new(Side::Ask, price, 1.0).into(), &market)
            .unwrap()
            .price_in_ticks()
            .unwrap();
        assert!(bid <= ask);
        assert!(ask - bid <= 1, "on-grid prices agree, off-grid differ by one tick");
    }
}

// ============================================================================
// SIZE ROUNDING
// ============================================================================

#[test]
fn size_floors_to_lot_grid() {
    let mut rng = ChaCha8Rng::seed_from_u64(1337);

    for market in markets() {
        let lot = Decimal::from(market.base_lot_size);

        for _ in 0..CASES {
            let size = rng.gen_range(0.0f64..50.0);
            let template: OrderTemplate = LimitOrderTemplate::new(Side::Bid, 10.0, size).into();
            let atoms = decimal(size) * pow10(market.base_decimals);

            match translate(&template, &market) {
                Ok(request) => {
                    let lots = Decimal::from(request.num_base_lots());
                    assert!(lots * lot <= atoms, "size {} grew", size);
                    assert!(atoms < (lots + Decimal::ONE) * lot, "size {} not floor", size);
                }
                Err(TranslationError::ZeroSizeOrder { unit, .. }) => {
                    assert_eq!(unit, SizeUnit::Base);
                    assert!(atoms < lot, "size {} has a whole lot", size);
                }
                Err(e) => panic!("unexpected error for size {}: {}", size, e),
            }
        }
    }
}

#[test]
fn sub_lot_sizes_are_rejected_for_every_variant() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let market = example_market();

    for _ in 0..CASES {
        // Strictly less than one lot (1.0 base unit)
        let size = rng.gen_range(0.0f64..0.999_999);
        let templates: [OrderTemplate; 3] = [
            LimitOrderTemplate::new(Side::Bid, 25.0, size).into(),
            PostOnlyOrderTemplate::new(Side::Ask, 25.0, size).into(),
            ImmediateOrCancelOrderTemplate::new(Side::Ask, Some(25.0), size, 0.0).into(),
        ];
        for template in templates {
            let result = translate(&template, &market);
            if size == 0.0 && matches!(template, OrderTemplate::ImmediateOrCancel(_)) {
                assert!(matches!(
                    result,
                    Err(TranslationError::AmbiguousSizeSpecification { .. })
                ));
            } else {
                assert!(
                    matches!(result, Err(TranslationError::ZeroSizeOrder { .. })),
                    "size {} produced {:?}",
                    size,
                    result
                );
            }
        }
    }
}

// ============================================================================
// VALIDITY WINDOW
// ============================================================================

#[test]
fn validity_window_is_total_over_templates() {
    let market = example_market();
    let cases = [
        (None, None, ValidityWindow::None),
        (Some(500), None, ValidityWindow::ExpiresAtSlot(500)),
        (None, Some(1_700_000_000), ValidityWindow::ExpiresAtUnixTime(1_700_000_000)),
        (
            Some(500),
            Some(1_700_000_000),
            ValidityWindow::ExpiresAtEarliestOf {
                slot: 500,
                unix_timestamp: 1_700_000_000,
            },
        ),
    ];

    for (slot, timestamp, expected) in cases {
        let mut limit = LimitOrderTemplate::new(Side::Bid, 25.0, 1.0);
        limit.last_valid_slot = slot;
        limit.last_valid_unix_timestamp_in_seconds = timestamp;

        let mut post = PostOnlyOrderTemplate::new(Side::Bid, 25.0, 1.0);
        post.last_valid_slot = slot;
        post.last_valid_unix_timestamp_in_seconds = timestamp;

        let mut ioc = ImmediateOrCancelOrderTemplate::market_sell(1.0);
        ioc.last_valid_slot = slot;
        ioc.last_valid_unix_timestamp_in_seconds = timestamp;

        for template in [
            OrderTemplate::from(limit),
            OrderTemplate::from(post),
            OrderTemplate::from(ioc),
        ] {
            let request = translate(&template, &market).unwrap();
            assert_eq!(request.validity(), expected);
        }
    }
}

// ============================================================================
// MINIMUM FILL
// ============================================================================

#[test]
fn minimum_fill_never_exceeds_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    // 1000 lots per unit so fractional sizes matter
    let market = MarketParameters::new(1_000_000, 1, 1, 9, 6);

    for _ in 0..CASES {
        let size = rng.gen_range(0.001f64..10.0);
        let min = rng.gen_range(0.0f64..12.0);
        let template: OrderTemplate =
            ImmediateOrCancelOrderTemplate::new(random_side(&mut rng), None, size, 0.0)
                .with_min_base_units_to_fill(min)
                .into();

        let size_lots = market
            .base_units_to_exact_lots(Ratio::from_float(size).unwrap())
            .unwrap()
            .floor() as u64;
        let min_lots = market
            .base_units_to_exact_lots(Ratio::from_float(min).unwrap())
            .unwrap()
            .floor() as u64;

        match translate(&template, &market) {
            Ok(OrderRequest::ImmediateOrCancel {
                num_base_lots,
                min_base_lots_to_fill,
                ..
            }) => {
                assert!(min_lots <= size_lots);
                assert_eq!(num_base_lots, size_lots);
                assert_eq!(min_base_lots_to_fill, min_lots);
            }
            Err(TranslationError::InvalidMinimumFill {
                unit,
                min_lots: reported_min,
                size_lots: reported_size,
            }) => {
                assert_eq!(unit, SizeUnit::Base);
                assert!(min_lots > size_lots);
                assert_eq!((reported_min, reported_size), (min_lots, size_lots));
            }
            other => panic!("size {} min {} produced {:?}", size, min, other),
        }
    }
}

// ============================================================================
// DETERMINISM
// ============================================================================

fn random_template(rng: &mut ChaCha8Rng) -> OrderTemplate {
    let side = random_side(rng);
    let price = random_price(rng);
    let size = rng.gen_range(1.0f64..100.0);
    match rng.gen_range(0..3) {
        0 => LimitOrderTemplate::new(side, price, size)
            .with_self_trade_behavior(SelfTradeBehavior::Abort)
            .with_client_order_id(rng.gen())
            .into(),
        1 => PostOnlyOrderTemplate::new(side, price, size)
            .with_last_valid_slot(rng.gen())
            .into(),
        _ => ImmediateOrCancelOrderTemplate::new(side, Some(price), size, 0.0)
            .with_last_valid_unix_timestamp(rng.gen())
            .into(),
    }
}

#[test]
fn translation_is_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let market = example_market();

    for _ in 0..CASES {
        let template = random_template(&mut rng);
        let first = translate(&template, &market).unwrap();
        let second = translate(&template, &market).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.digest().unwrap(), second.digest().unwrap());
    }
}

#[test]
fn translation_is_deterministic_across_threads() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let market = example_market();
    let translator = Translator::default();
    let templates: Vec<OrderTemplate> = (0..200).map(|_| random_template(&mut rng)).collect();

    let expected: Vec<OrderRequest> = templates
        .iter()
        .map(|t| translator.translate(t, &market).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    templates
                        .iter()
                        .map(|t| translator.translate(t, &market).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// ============================================================================
// WORKED EXAMPLES
// ============================================================================

#[test]
fn example_bid_25_0037() {
    let template: OrderTemplate = LimitOrderTemplate::new(Side::Bid, 25.0037, 1.5).into();
    let request = translate(&template, &example_market()).unwrap();

    assert_eq!(request.price_in_ticks(), Some(25_003));
    assert_eq!(request.num_base_lots(), 1);
    assert_eq!(example_market().ticks_to_price(25_003), Some(dec!(25.003)));
}

#[test]
fn rejecting_post_only_passes_crossing_price_through() {
    let market = example_market();
    // Resting asks at 25.000; a bid at 26.0 would cross
    let top = TopOfBook::new(Some(24_990), Some(25_000));
    let template: OrderTemplate = PostOnlyOrderTemplate::new(Side::Bid, 26.0, 2.0).into();

    let request = Translator::default()
        .translate_with_top_of_book(&template, &market, &top)
        .unwrap();
    assert_eq!(
        request,
        OrderRequest::PostOnly {
            side: Side::Bid,
            price_in_ticks: 26_000,
            num_base_lots: 2,
            client_order_id: 0,
            reject_post_only: true,
            use_only_deposited_funds: false,
            validity: ValidityWindow::None,
        }
    );
}

#[test]
fn parameter_errors_are_flagged_fatal() {
    let market = MarketParameters::new(1_000_000, 100, 0, 6, 6);
    let template: OrderTemplate = LimitOrderTemplate::new(Side::Bid, 25.0, 1.0).into();
    let err = translate(&template, &market).unwrap_err();
    assert!(err.is_parameter_error());
    assert_eq!(
        err,
        TranslationError::NonPositiveMarketParameter {
            field: "tick_size",
            value: 0,
        }
    );
}
