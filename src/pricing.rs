// 2.0 pricing.rs: bid/ask from a mid price.
// binaries never quote below 0.0001; everything else floors
// non-positive prices at 0.001.
// forwards split the spread 40/60 around mid and ignore forced spreads.

use crate::quoting::{QuotingParams, SpreadSource};
use crate::types::{OptionType, Price, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const BINARY_MIN_PRICE: Decimal = dec!(0.0001);
pub const MIN_PRICE: Decimal = dec!(0.001);

pub const FORWARD_BID_WEIGHT: Decimal = dec!(0.4);
pub const FORWARD_ASK_WEIGHT: Decimal = dec!(0.6);

// VANILLA_SPREAD is quoted in bps of bps of spot
const VANILLA_SPREAD_SCALE: Decimal = dec!(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub mid_price: Decimal,
    pub option_type: OptionType,
    pub side: Side,
    pub current_spot_price: Decimal,
    pub spread_source: SpreadSource,
}

impl PricingRequest {
    pub fn with_quoting(
        mid_price: Decimal,
        option_type: OptionType,
        side: Side,
        current_spot_price: Decimal,
        params: QuotingParams,
    ) -> Self {
        Self {
            mid_price,
            option_type,
            side,
            current_spot_price,
            spread_source: SpreadSource::Quoting(params),
        }
    }

    pub fn with_forced_spread(
        mid_price: Decimal,
        option_type: OptionType,
        side: Side,
        current_spot_price: Decimal,
        forced_spread: Decimal,
    ) -> Self {
        Self {
            mid_price,
            option_type,
            side,
            current_spot_price,
            spread_source: SpreadSource::Forced(forced_spread),
        }
    }

    // same request on the other side of the book
    pub fn flipped(&self) -> Self {
        Self {
            side: self.side.opposite(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid configuration: no {field} spread for {option_type}; provide quoting params or a forced spread")]
    InvalidConfiguration {
        option_type: OptionType,
        field: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoSidedQuote {
    pub bid: Price,
    pub ask: Price,
}

impl TwoSidedQuote {
    pub fn width(&self) -> Decimal {
        self.ask.value() - self.bid.value()
    }
}

pub fn min_price_for(option_type: &OptionType) -> Decimal {
    if option_type.is_binary() {
        BINARY_MIN_PRICE
    } else {
        MIN_PRICE
    }
}

pub fn floor_price(price: Decimal, minimum: Decimal) -> Price {
    if price > Decimal::ZERO {
        Price::new_unchecked(price)
    } else {
        Price::new_unchecked(minimum)
    }
}

// 2.1: total spread before it gets split around mid.
// forwards never reach here, see forward_price.
pub fn resolve_spread(request: &PricingRequest) -> Result<Decimal, PricingError> {
    if let Some(forced) = request.spread_source.forced_spread() {
        return Ok(forced);
    }

    let params = request.spread_source.quoting_params();
    match &request.option_type {
        OptionType::BinaryCall | OptionType::BinaryPut => params
            .and_then(|p| p.digital_spread)
            .ok_or_else(|| PricingError::InvalidConfiguration {
                option_type: request.option_type.clone(),
                field: "DIGITAL_SPREAD",
            }),
        _ => {
            let vanilla = params.and_then(|p| p.vanilla_spread).ok_or_else(|| {
                PricingError::InvalidConfiguration {
                    option_type: request.option_type.clone(),
                    field: "VANILLA_SPREAD",
                }
            })?;
            Ok(vanilla / VANILLA_SPREAD_SCALE / VANILLA_SPREAD_SCALE * request.current_spot_price)
        }
    }
}

// 2.2: forwards quote asymmetrically off FORWARD_SPREAD only.
// a forced spread is ignored and leaves the forward at mid.
fn forward_price(request: &PricingRequest) -> Result<Price, PricingError> {
    let spread = match &request.spread_source {
        SpreadSource::Forced(_) => Decimal::ZERO,
        SpreadSource::Quoting(params) => {
            params
                .forward_spread
                .ok_or_else(|| PricingError::InvalidConfiguration {
                    option_type: OptionType::Forward,
                    field: "FORWARD_SPREAD",
                })?
        }
    };

    let price = match request.side {
        Side::Sell => request.mid_price - FORWARD_BID_WEIGHT * spread,
        Side::Buy => request.mid_price + FORWARD_ASK_WEIGHT * spread,
    };

    Ok(Price::new_unchecked(price.max(MIN_PRICE)))
}

/// Bid (SELL) or ask (BUY) price for a single request.
pub fn calculate_bid_ask(request: &PricingRequest) -> Result<Price, PricingError> {
    if let OptionType::Unlisted(name) = &request.option_type {
        warn!(option_type = %name, "unlisted option type, pricing with vanilla spread");
    }

    if request.option_type.is_forward() {
        return forward_price(request);
    }

    let spread = resolve_spread(request)?;
    let half_spread = spread / dec!(2);

    let raw = match request.side {
        Side::Sell => request.mid_price - half_spread,
        Side::Buy => request.mid_price + half_spread,
    };

    let minimum = min_price_for(&request.option_type);
    let price = if request.option_type.is_binary() {
        Price::new_unchecked(raw.max(minimum))
    } else {
        floor_price(raw, minimum)
    };
    debug!(
        option_type = %request.option_type,
        side = %request.side,
        mid = %request.mid_price,
        spread = %spread,
        price = %price,
        "priced"
    );
    Ok(price)
}

/// Bid and ask for the same mid/type/spread context; the request side is ignored.
pub fn two_sided_quote(request: &PricingRequest) -> Result<TwoSidedQuote, PricingError> {
    let bid = calculate_bid_ask(&PricingRequest {
        side: Side::Sell,
        ..request.clone()
    })?;
    let ask = calculate_bid_ask(&PricingRequest {
        side: Side::Buy,
        ..request.clone()
    })?;
    Ok(TwoSidedQuote { bid, ask })
}
