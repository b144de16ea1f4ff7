//! Pricing simulation.
//!
//! Walks through bid/ask pricing for each product family, a close-position
//! order and a collateral summary, printing what the trading screens show.

use auction_pricing::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match PricingConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("could not load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Environment::Development.config(),
    };

    info!(pair = %config.currency_pair, "pricing simulation");

    scenario_1_vanilla_quotes(&config);
    scenario_2_binaries_and_forwards(&config);
    scenario_3_forced_spread(&config);
    scenario_4_missing_config();
    scenario_5_close_position(&config);
    scenario_6_collateral(&config);

    println!("\nAll simulations completed.");
}

fn print_quote(label: &str, request: &PricingRequest) {
    match two_sided_quote(request) {
        Ok(quote) => println!(
            "  {:<22} mid {:>10}  bid {:>10}  ask {:>10}",
            label, request.mid_price, quote.bid, quote.ask
        ),
        Err(e) => println!("  {:<22} error: {}", label, e),
    }
}

/// Vanilla calls and puts, spread scaled by spot.
fn scenario_1_vanilla_quotes(config: &PricingConfig) {
    println!("Scenario 1: Vanilla Quotes (spot 2000)\n");

    for (label, option_type, mid) in [
        ("Call 2000", OptionType::Call, dec!(10)),
        ("Put 1800", OptionType::Put, dec!(3.2)),
        ("Call 3000 (deep OTM)", OptionType::Call, dec!(0.2)),
    ] {
        let req = PricingRequest::with_quoting(mid, option_type, Side::Buy, dec!(2000), config.quoting_params.clone());
        print_quote(label, &req);
    }
    println!();
}

/// Digital and forward products.
fn scenario_2_binaries_and_forwards(config: &PricingConfig) {
    println!("Scenario 2: Binaries and Forwards\n");

    for (label, option_type, mid) in [
        ("BinaryCall 2000", OptionType::BinaryCall, dec!(0.45)),
        ("BinaryPut 1500", OptionType::BinaryPut, dec!(0.00005)),
        ("Forward", OptionType::Forward, dec!(2010)),
    ] {
        let req = PricingRequest::with_quoting(mid, option_type, Side::Buy, dec!(2000), config.quoting_params.clone());
        print_quote(label, &req);
    }
    println!();
}

/// Caller-supplied spread replacing the quoting params.
fn scenario_3_forced_spread(config: &PricingConfig) {
    println!("Scenario 3: Forced Spread\n");

    let req = PricingRequest::with_forced_spread(dec!(0.005), OptionType::Call, Side::Sell, dec!(2000), dec!(0.02));
    print_quote("Call, forced 0.02", &req);

    let precision = config.currency_precision.strike;
    if let Ok(price) = calculate_bid_ask(&req) {
        println!("  floored sell price shown as {}", format_fixed_places(price.value(), precision));
    }
    println!();
}

/// Snapshot without the needed field fails loudly.
fn scenario_4_missing_config() {
    println!("Scenario 4: Missing Quoting Params\n");

    let req = PricingRequest::with_quoting(dec!(0.5), OptionType::BinaryCall, Side::Sell, dec!(2000), QuotingParams::empty());
    print_quote("BinaryCall, no params", &req);
    println!();
}

/// Closing half of a short call position.
fn scenario_5_close_position(config: &PricingConfig) {
    println!("Scenario 5: Close Position\n");

    let position = PositionRow {
        tenor: "29MAR24".to_string(),
        product: "Call".to_string(),
        strike: dec!(2000),
        quantity: dec!(-3),
        average_price: dec!(41.25),
    };

    match close_position_order(
        &position,
        dec!(50),
        ContractId(101),
        ClientOrderId::generate(0),
        config.currency_precision.strike,
    ) {
        Ok(order) => {
            let leg = &order.legs[0];
            println!("  {} {} of contract {:?}", leg.side, leg.quantity, leg.contract_id);
            println!("  net price {}\n", order.total_net_price);
        }
        Err(e) => println!("  error: {}\n", e),
    }
}

/// Wallet, fundlock and locked collateral per currency.
fn scenario_6_collateral(config: &PricingConfig) {
    println!("Scenario 6: Collateral Summary\n");

    let mut balances = BTreeMap::new();
    for (currency, raw_wallet, raw_fundlock) in [
        (Currency::Usdc, 2_500_000_000u128, 12_000_000_000u128),
        (Currency::Weth, 1_250_000_000_000_000_000u128, 3_000_000_000_000_000_000u128),
    ] {
        let Some(decimals) = config.token_decimals(currency) else {
            error!(%currency, "no token decimals configured");
            continue;
        };
        let (Ok(wallet_balance), Ok(fund_lock_value)) =
            (format_units(raw_wallet, decimals), format_units(raw_fundlock, decimals))
        else {
            continue;
        };
        balances.insert(
            currency,
            CurrencyBalances {
                wallet_balance,
                fund_lock_value,
            },
        );
    }

    let locks = [
        LockedCollateral::new(dec!(0.5), dec!(1500)),
        LockedCollateral::new(Decimal::ZERO, dec!(820.5)),
    ];

    for (currency, summary) in collateral_summary(&balances, &locks) {
        println!(
            "  {}: wallet {}, fundlock {}, in orders {}, available {}",
            currency,
            format_by_currency(summary.wallet_balance, currency, None),
            format_by_currency(summary.fund_lock_value, currency, None),
            format_by_currency(summary.order_value, currency, None),
            format_by_currency(summary.available_collateral, currency, None),
        );
    }
}
