//! Order Translator - command line entry point
//!
//! Builds an order template from flags, translates it against the market
//! parameters given on the command line, and prints the resulting request
//! as JSON.
//!
//! ```bash
//! order-translator --base-lot-size 1000000 --quote-lot-size 100 --tick-size 10 \
//!     --base-decimals 6 --quote-decimals 6 \
//!     limit --side bid --price 25.0037 --size 1.5
//! ```

use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use order_translator::{
    ImmediateOrCancelOrderTemplate, LimitOrderTemplate, MarketOrderMinFill, MarketParameters,
    OrderRequest, OrderTemplate, PostOnlyOrderTemplate, SelfTradeBehavior, Side, TopOfBook,
    TranslationError, Translator, TranslatorConfig,
};

#[derive(Parser)]
#[command(name = "order-translator")]
#[command(about = "Translate a human-unit order into lots and ticks")]
struct Cli {
    #[command(flatten)]
    market: MarketArgs,
    /// Minimum-fill policy for market IOC orders
    /// (overrides ORDER_TRANSLATOR_MARKET_MIN_FILL)
    #[arg(long)]
    market_min_fill: Option<MarketOrderMinFill>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MarketArgs {
    /// Base atoms per base lot
    #[arg(long)]
    base_lot_size: u64,
    /// Quote atoms per quote lot
    #[arg(long)]
    quote_lot_size: u64,
    /// Quote lots per base lot per tick
    #[arg(long)]
    tick_size: u64,
    #[arg(long)]
    base_decimals: u32,
    #[arg(long)]
    quote_decimals: u32,
}

#[derive(Args)]
struct OrderArgs {
    #[arg(long)]
    side: Side,
    #[arg(long, default_value_t = 0)]
    client_order_id: u128,
    #[arg(long)]
    use_only_deposited_funds: bool,
    #[arg(long)]
    last_valid_slot: Option<u64>,
    #[arg(long, allow_hyphen_values = true)]
    last_valid_unix_timestamp: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Limit order (may take, then rests)
    Limit {
        #[command(flatten)]
        order: OrderArgs,
        #[arg(short = 'p', long)]
        price: Option<f64>,
        #[arg(short = 'q', long)]
        size: f64,
        #[arg(long, default_value = "cancel-provide")]
        self_trade: SelfTradeBehavior,
        #[arg(long)]
        match_limit: Option<u64>,
    },
    /// Post-only order (never takes)
    PostOnly {
        #[command(flatten)]
        order: OrderArgs,
        #[arg(short = 'p', long)]
        price: Option<f64>,
        #[arg(short = 'q', long)]
        size: f64,
        /// Amend a crossing price instead of letting the engine reject it
        #[arg(long)]
        amend: bool,
        /// Best bid in ticks, used with --amend
        #[arg(long)]
        best_bid: Option<u64>,
        /// Best ask in ticks, used with --amend
        #[arg(long)]
        best_ask: Option<u64>,
    },
    /// Immediate-or-cancel order; omit --price for a market order
    Ioc {
        #[command(flatten)]
        order: OrderArgs,
        #[arg(short = 'p', long)]
        price: Option<f64>,
        #[arg(short = 'q', long, default_value_t = 0.0)]
        size: f64,
        #[arg(long, default_value_t = 0.0)]
        quote_size: f64,
        #[arg(long, default_value_t = 0.0)]
        min_size: f64,
        #[arg(long, default_value_t = 0.0)]
        min_quote_size: f64,
        #[arg(long, default_value = "cancel-provide")]
        self_trade: SelfTradeBehavior,
        #[arg(long)]
        match_limit: Option<u64>,
    },
}

#[derive(Serialize)]
struct TranslationOutput<'a> {
    request: &'a OrderRequest,
    digest: String,
    fill_or_kill: bool,
    /// Quantized price back in quote units per base unit
    price: Option<String>,
    /// Quantized size back in base units
    size_in_base_units: Option<String>,
}

fn init_tracing() {
    let env_debug = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env_debug == "1" {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    // Only set the global subscriber if it hasn't been set already
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn build_template(command: Commands) -> (OrderTemplate, Option<TopOfBook>) {
    match command {
        Commands::Limit {
            order,
            price,
            size,
            self_trade,
            match_limit,
        } => {
            let template = LimitOrderTemplate {
                side: order.side,
                price_as_float: price,
                size_in_base_units: size,
                self_trade_behavior: self_trade,
                match_limit,
                client_order_id: order.client_order_id,
                use_only_deposited_funds: order.use_only_deposited_funds,
                last_valid_slot: order.last_valid_slot,
                last_valid_unix_timestamp_in_seconds: order.last_valid_unix_timestamp,
            };
            (template.into(), None)
        }
        Commands::PostOnly {
            order,
            price,
            size,
            amend,
            best_bid,
            best_ask,
        } => {
            let template = PostOnlyOrderTemplate {
                side: order.side,
                price_as_float: price,
                size_in_base_units: size,
                client_order_id: order.client_order_id,
                reject_post_only: !amend,
                use_only_deposited_funds: order.use_only_deposited_funds,
                last_valid_slot: order.last_valid_slot,
                last_valid_unix_timestamp_in_seconds: order.last_valid_unix_timestamp,
            };
            let top = (best_bid.is_some() || best_ask.is_some())
                .then(|| TopOfBook::new(best_bid, best_ask));
            (template.into(), top)
        }
        Commands::Ioc {
            order,
            price,
            size,
            quote_size,
            min_size,
            min_quote_size,
            self_trade,
            match_limit,
        } => {
            let template = ImmediateOrCancelOrderTemplate {
                side: order.side,
                price_as_float: price,
                size_in_base_units: size,
                size_in_quote_units: quote_size,
                min_base_units_to_fill: min_size,
                min_quote_units_to_fill: min_quote_size,
                self_trade_behavior: self_trade,
                match_limit,
                client_order_id: order.client_order_id,
                use_only_deposited_funds: order.use_only_deposited_funds,
                last_valid_slot: order.last_valid_slot,
                last_valid_unix_timestamp_in_seconds: order.last_valid_unix_timestamp,
            };
            (template.into(), None)
        }
    }
}

impl MarketArgs {
    fn to_market(&self) -> MarketParameters {
        MarketParameters::new(
            self.base_lot_size,
            self.quote_lot_size,
            self.tick_size,
            self.base_decimals,
            self.quote_decimals,
        )
    }
}

/// Translate the order described by the command line.
fn run(cli: Cli) -> (MarketParameters, Result<OrderRequest, TranslationError>) {
    let mut config = TranslatorConfig::from_env();
    if let Some(policy) = cli.market_min_fill {
        config.market_order_min_fill = policy;
    }
    debug!(?config, "translator configured");

    let market = cli.market.to_market();
    let translator = Translator::new(config);
    let (template, top) = build_template(cli.command);
    let result = match top {
        Some(top) => translator.translate_with_top_of_book(&template, &market, &top),
        None => translator.translate(&template, &market),
    };
    (market, result)
}

/// Misconfigured market parameters are fatal for the caller (2); a
/// rejected order is not (1).
fn exit_code(error: &TranslationError) -> i32 {
    if error.is_parameter_error() {
        2
    } else {
        1
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();
    init_tracing();

    let (market, result) = run(Cli::parse());

    match result {
        Ok(request) => {
            let output = TranslationOutput {
                request: &request,
                digest: request.digest_hex()?,
                fill_or_kill: request.is_fill_or_kill(),
                price: request
                    .price_in_ticks()
                    .and_then(|ticks| market.ticks_to_price(ticks))
                    .map(|d| d.to_string()),
                size_in_base_units: market
                    .base_lots_to_base_units(request.num_base_lots())
                    .map(|d| d.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
