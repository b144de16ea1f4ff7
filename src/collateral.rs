//! Collateral summaries.
//!
//! The front-end shows, per currency, what sits in the wallet, what is
//! deposited in the fundlock, how much of that is locked by open orders and
//! what is left to trade with.

use crate::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collateral locked by one order or position, split by currency role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedCollateral {
    pub underlying_amount: Decimal,
    pub numeraire_amount: Decimal,
}

impl LockedCollateral {
    pub fn new(underlying_amount: Decimal, numeraire_amount: Decimal) -> Self {
        Self {
            underlying_amount,
            numeraire_amount,
        }
    }

    pub fn amount_for(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Weth => self.underlying_amount,
            Currency::Usdc => self.numeraire_amount,
        }
    }

    pub fn add(&self, other: &LockedCollateral) -> Self {
        Self {
            underlying_amount: self.underlying_amount + other.underlying_amount,
            numeraire_amount: self.numeraire_amount + other.numeraire_amount,
        }
    }
}

pub fn sum_locked_collateral<'a, I>(locks: I) -> LockedCollateral
where
    I: IntoIterator<Item = &'a LockedCollateral>,
{
    locks
        .into_iter()
        .fold(LockedCollateral::default(), |acc, lock| acc.add(lock))
}

/// Balances for one currency as reported by the wallet and the fundlock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyBalances {
    pub wallet_balance: Decimal,
    pub fund_lock_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralSummary {
    pub currency: Currency,
    pub wallet_balance: Decimal,
    pub fund_lock_value: Decimal,
    pub order_value: Decimal,
    pub available_collateral: Decimal,
}

impl CollateralSummary {
    pub fn from_parts(currency: Currency, balances: CurrencyBalances, locked: Decimal) -> Self {
        let available = (balances.fund_lock_value - locked).max(Decimal::ZERO);
        Self {
            currency,
            wallet_balance: balances.wallet_balance,
            fund_lock_value: balances.fund_lock_value,
            order_value: locked,
            available_collateral: available,
        }
    }

    pub fn can_cover(&self, amount: Decimal) -> bool {
        amount <= self.available_collateral
    }
}

// currencies without reported balances show as zero
pub fn collateral_summary(
    balances: &BTreeMap<Currency, CurrencyBalances>,
    locks: &[LockedCollateral],
) -> BTreeMap<Currency, CollateralSummary> {
    let locked = sum_locked_collateral(locks);
    Currency::ALL
        .iter()
        .map(|&currency| {
            let bal = balances.get(&currency).copied().unwrap_or_default();
            (
                currency,
                CollateralSummary::from_parts(currency, bal, locked.amount_for(currency)),
            )
        })
        .collect()
}
