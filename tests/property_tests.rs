//! Property-based tests for the pricing math.
//!
//! These tests verify invariants hold under random inputs.

use auction_pricing::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Strategies for generating test data
fn mid_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|x| Decimal::new(x, 5)) // 0.00001 to 100
}

// mids clustered around the binary floor
fn binary_mid_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (1i64..1_000i64).prop_map(|x| Decimal::new(x, 6)), // 0.000001 to 0.001
        mid_strategy(),
    ]
}

fn small_signed_spread_strategy() -> impl Strategy<Value = Decimal> {
    (-2_000i64..2_000i64).prop_map(|x| Decimal::new(x, 7)) // -0.0002 to 0.0002
}

fn spot_strategy() -> impl Strategy<Value = Decimal> {
    (100_00i64..10_000_00i64).prop_map(|x| Decimal::new(x, 2)) // $100 to $10,000
}

fn vanilla_spread_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..2_000i64).prop_map(|x| Decimal::new(x, 2)) // 0 to 20
}

fn signed_spread_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000i64).prop_map(|x| Decimal::new(x, 4)) // -10 to 10
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn vanilla_type_strategy() -> impl Strategy<Value = OptionType> {
    prop_oneof![
        Just(OptionType::Call),
        Just(OptionType::Put),
        Just(OptionType::Unlisted("Spot".to_string())),
    ]
}

fn any_type_strategy() -> impl Strategy<Value = OptionType> {
    prop_oneof![
        Just(OptionType::Call),
        Just(OptionType::Put),
        Just(OptionType::BinaryCall),
        Just(OptionType::BinaryPut),
        Just(OptionType::Forward),
    ]
}

fn params_with_vanilla(spread: Decimal) -> QuotingParams {
    QuotingParams {
        vanilla_spread: Some(spread),
        ..QuotingParams::default()
    }
}

proptest! {
    /// SELL vanilla = mid - spread/2, floored at 0.001
    #[test]
    fn vanilla_sell_is_mid_minus_half_spread(
        mid in mid_strategy(),
        spot in spot_strategy(),
        vanilla in vanilla_spread_strategy(),
        option_type in vanilla_type_strategy(),
    ) {
        let req = PricingRequest::with_quoting(mid, option_type, Side::Sell, spot, params_with_vanilla(vanilla));
        let spread = vanilla / dec!(100) / dec!(100) * spot;
        let expected = mid - spread / dec!(2);

        let price = calculate_bid_ask(&req).unwrap().value();
        if expected > Decimal::ZERO {
            prop_assert_eq!(price, expected);
        } else {
            prop_assert_eq!(price, MIN_PRICE);
        }
    }

    /// BUY vanilla = mid + spread/2
    #[test]
    fn vanilla_buy_is_mid_plus_half_spread(
        mid in mid_strategy(),
        spot in spot_strategy(),
        vanilla in vanilla_spread_strategy(),
    ) {
        let req = PricingRequest::with_quoting(mid, OptionType::Call, Side::Buy, spot, params_with_vanilla(vanilla));
        let spread = vanilla / dec!(100) / dec!(100) * spot;

        let price = calculate_bid_ask(&req).unwrap().value();
        prop_assert_eq!(price, mid + spread / dec!(2));
    }

    /// Forward ask - bid = spread when neither side is floored
    #[test]
    fn forward_width_is_full_spread(
        mid in (1_000i64..1_000_000i64).prop_map(|x| Decimal::new(x, 2)),
        forward in (1i64..10_000i64).prop_map(|x| Decimal::new(x, 2)),
    ) {
        let params = QuotingParams {
            forward_spread: Some(forward),
            ..QuotingParams::default()
        };
        let req = PricingRequest::with_quoting(mid, OptionType::Forward, Side::Buy, mid, params);
        let quote = two_sided_quote(&req).unwrap();

        let bid_raw = mid - dec!(0.4) * forward;
        prop_assume!(bid_raw > MIN_PRICE);

        prop_assert_eq!(quote.width(), forward);
        prop_assert_ne!(quote.bid.value(), mid - forward / dec!(2));
        prop_assert_ne!(quote.ask.value(), mid + forward / dec!(2));
    }

    /// Binaries never go below 0.0001, whatever the spread sign or size
    #[test]
    fn binary_never_below_floor(
        mid in binary_mid_strategy(),
        spread in prop_oneof![signed_spread_strategy(), small_signed_spread_strategy()],
        side in side_strategy(),
        call in any::<bool>(),
    ) {
        let option_type = if call { OptionType::BinaryCall } else { OptionType::BinaryPut };
        let forced = PricingRequest::with_forced_spread(mid, option_type.clone(), side, dec!(2000), spread);
        prop_assert!(calculate_bid_ask(&forced).unwrap().value() >= BINARY_MIN_PRICE);

        let params = QuotingParams { digital_spread: Some(spread), ..QuotingParams::default() };
        let quoted = PricingRequest::with_quoting(mid, option_type, side, dec!(2000), params);
        prop_assert!(calculate_bid_ask(&quoted).unwrap().value() >= BINARY_MIN_PRICE);
    }

    /// Prices are strictly positive; binaries clamp to their floor, other types floor only non-positive prices
    #[test]
    fn price_always_positive(
        mid in mid_strategy(),
        spread in signed_spread_strategy(),
        side in side_strategy(),
        option_type in any_type_strategy(),
    ) {
        let params = QuotingParams {
            vanilla_spread: Some(spread.abs()),
            digital_spread: Some(spread),
            forward_spread: Some(spread),
        };
        let req = PricingRequest::with_quoting(mid, option_type.clone(), side, dec!(2000), params);
        let price = calculate_bid_ask(&req).unwrap().value();
        prop_assert!(price > Decimal::ZERO);

        if !option_type.is_forward() {
            let half = resolve_spread(&req).unwrap() / dec!(2);
            let raw = mid + side.sign() * half;
            if option_type.is_binary() {
                prop_assert_eq!(price, raw.max(BINARY_MIN_PRICE));
            } else if raw <= Decimal::ZERO {
                prop_assert_eq!(price, MIN_PRICE);
            } else {
                prop_assert_eq!(price, raw);
            }
        }
    }

    /// A forced spread leaves forwards at mid, floored at 0.001
    #[test]
    fn forward_ignores_forced_spread(
        mid in mid_strategy(),
        spread in signed_spread_strategy(),
        side in side_strategy(),
    ) {
        let req = PricingRequest::with_forced_spread(mid, OptionType::Forward, side, dec!(2000), spread);
        prop_assert_eq!(calculate_bid_ask(&req).unwrap().value(), mid.max(MIN_PRICE));
    }

    /// Empty quoting params fail for every option type
    #[test]
    fn empty_params_are_invalid_configuration(
        mid in mid_strategy(),
        side in side_strategy(),
        option_type in any_type_strategy(),
    ) {
        let req = PricingRequest::with_quoting(mid, option_type, side, dec!(2000), QuotingParams::empty());
        let result = calculate_bid_ask(&req);
        prop_assert!(
            matches!(result, Err(PricingError::InvalidConfiguration { .. })),
            "expected InvalidConfiguration"
        );
    }

    /// Bid never exceeds ask for a non-negative spread
    #[test]
    fn bid_not_above_ask(
        mid in (1_000i64..10_000_000i64).prop_map(|x| Decimal::new(x, 5)),
        spread in (0i64..100_000i64).prop_map(|x| Decimal::new(x, 4)),
        option_type in any_type_strategy(),
    ) {
        let params = QuotingParams {
            vanilla_spread: Some(spread),
            digital_spread: Some(spread),
            forward_spread: Some(spread),
        };
        let req = PricingRequest::with_quoting(mid, option_type, Side::Buy, dec!(2000), params);
        let quote = two_sided_quote(&req).unwrap();
        prop_assert!(quote.bid <= quote.ask);
    }

    /// Net price flips sign when every leg flips side
    #[test]
    fn net_price_antisymmetric_in_side(
        quantities in proptest::collection::vec((1i64..1_000i64).prop_map(|x| Decimal::new(x, 2)), 1..6),
        price in (1i64..100_000i64).prop_map(|x| Decimal::new(x, 2)),
    ) {
        let legs: Vec<OrderLeg> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| OrderLeg {
                contract_id: ContractId(i as u64),
                quantity: *q,
                side: if i % 2 == 0 { Side::Buy } else { Side::Sell },
            })
            .collect();
        let flipped: Vec<OrderLeg> = legs
            .iter()
            .map(|l| OrderLeg { side: l.side.opposite(), ..l.clone() })
            .collect();
        let prices = vec![price; legs.len()];

        let a = calculate_net_price(&legs, &prices, 4).unwrap();
        let b = calculate_net_price(&flipped, &prices, 4).unwrap();
        prop_assert_eq!(a, -b);
    }

    /// Base units survive a trip through decimal text
    #[test]
    fn token_units_round_trip(
        raw in 0u128..1_000_000_000_000_000_000_000u128,
        decimals in prop_oneof![Just(6u32), Just(18u32)],
    ) {
        let amount = format_units(raw, decimals).unwrap();
        let back = parse_units(&amount.to_string(), decimals).unwrap();
        prop_assert_eq!(back, raw);
    }

    /// Available collateral is never negative and never exceeds the fundlock
    #[test]
    fn available_collateral_bounded(
        fundlock in (0i64..1_000_000i64).prop_map(|x| Decimal::new(x, 2)),
        locked in proptest::collection::vec((0i64..100_000i64).prop_map(|x| Decimal::new(x, 2)), 0..5),
    ) {
        let mut balances = std::collections::BTreeMap::new();
        balances.insert(Currency::Usdc, CurrencyBalances { wallet_balance: Decimal::ZERO, fund_lock_value: fundlock });
        let locks: Vec<LockedCollateral> = locked
            .iter()
            .map(|n| LockedCollateral::new(Decimal::ZERO, *n))
            .collect();

        let summary = collateral_summary(&balances, &locks);
        let usdc = &summary[&Currency::Usdc];
        prop_assert!(usdc.available_collateral >= Decimal::ZERO);
        prop_assert!(usdc.available_collateral <= fundlock);
    }
}
