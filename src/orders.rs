// 3.0 orders.rs: multi-leg order economics.
// net price is the side-signed, quantity-weighted sum of leg prices,
// rounded to the strike currency precision.
// 3.1 close orders take a percentage of an open position off the book.

use crate::types::Side;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientOrderId(pub u64);

impl ClientOrderId {
    // millisecond clock scaled up so two ids in the same ms differ by `seq`
    pub fn generate(seq: u16) -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self(millis * 1_000 + u64::from(seq % 1_000))
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLeg {
    pub contract_id: ContractId,
    pub quantity: Decimal,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrder {
    pub client_order_id: ClientOrderId,
    pub total_net_price: Decimal,
    pub legs: Vec<OrderLeg>,
}

// a row of the positions table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRow {
    pub tenor: String,
    pub product: String,
    pub strike: Decimal,
    // negative = short
    pub quantity: Decimal,
    pub average_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Order has no legs")]
    NoLegs,

    #[error("Got {prices} prices for {legs} legs")]
    PriceCountMismatch { legs: usize, prices: usize },

    #[error("Close percentage {0} outside 1..=100")]
    InvalidClosePercent(Decimal),

    #[error("Position has zero quantity")]
    EmptyPosition,
}

pub fn leg_value(leg: &OrderLeg, price: Decimal) -> Decimal {
    leg.side.sign() * leg.quantity * price
}

/// Net price of a multi-leg order, rounded half away from zero to `precision` places.
pub fn calculate_net_price(
    legs: &[OrderLeg],
    prices: &[Decimal],
    precision: u32,
) -> Result<Decimal, OrderError> {
    if legs.is_empty() {
        return Err(OrderError::NoLegs);
    }
    if legs.len() != prices.len() {
        return Err(OrderError::PriceCountMismatch {
            legs: legs.len(),
            prices: prices.len(),
        });
    }

    let total: Decimal = legs
        .iter()
        .zip(prices)
        .map(|(leg, price)| leg_value(leg, *price))
        .sum();

    Ok(total.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero))
}

pub fn build_order(
    client_order_id: ClientOrderId,
    legs: Vec<OrderLeg>,
    prices: &[Decimal],
    precision: u32,
) -> Result<ClientOrder, OrderError> {
    let total_net_price = calculate_net_price(&legs, prices, precision)?;
    Ok(ClientOrder {
        client_order_id,
        total_net_price,
        legs,
    })
}

// 3.1: close `percent`% of a position with a single opposing leg at its average price
pub fn close_position_order(
    position: &PositionRow,
    percent: Decimal,
    contract_id: ContractId,
    client_order_id: ClientOrderId,
    precision: u32,
) -> Result<ClientOrder, OrderError> {
    if percent < Decimal::ONE || percent > dec!(100) {
        return Err(OrderError::InvalidClosePercent(percent));
    }
    if position.quantity.is_zero() {
        return Err(OrderError::EmptyPosition);
    }

    let size = position.quantity.abs() * percent / dec!(100);
    let side = if position.quantity < Decimal::ZERO {
        Side::Buy
    } else {
        Side::Sell
    };

    debug!(
        product = %position.product,
        strike = %position.strike,
        %size,
        %side,
        "closing position"
    );

    let legs = vec![OrderLeg {
        contract_id,
        quantity: size,
        side,
    }];
    build_order(client_order_id, legs, &[position.average_price], precision)
}
