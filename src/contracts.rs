// 5.0 contracts.rs: contract list filtering.
// the SDK hands back every contract on the platform. the trading screens
// only care about tradeable contracts of one currency pair, looked up by
// expiry, then payoff, then strike.

use crate::orders::ContractId;
use crate::types::OptionType;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Contract expiry date. The SDK sends it as a `YYYYMMDD` integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Expiry(NaiveDate);

impl Expiry {
    pub fn from_yyyymmdd(raw: u32) -> Result<Self, ContractError> {
        let year = (raw / 10_000) as i32;
        let month = (raw / 100) % 100;
        let day = raw % 100;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(ContractError::InvalidExpiry(raw))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn as_yyyymmdd(&self) -> u32 {
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }

    pub fn is_expired_at(&self, today: NaiveDate) -> bool {
        self.0 < today
    }
}

impl TryFrom<u32> for Expiry {
    type Error = ContractError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::from_yyyymmdd(raw)
    }
}

impl From<Expiry> for u32 {
    fn from(expiry: Expiry) -> Self {
        expiry.as_yyyymmdd()
    }
}

// tenor label, e.g. 29MAR24
impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d%b%y").to_string().to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economics {
    pub currency_pair: String,
    pub expiry: Expiry,
    #[serde(default)]
    pub strike: Option<Decimal>,
    #[serde(default)]
    pub price_currency: String,
    #[serde(default)]
    pub qty_currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_id: ContractId,
    pub payoff: OptionType,
    pub tradeable: bool,
    pub economics: Economics,
}

impl Contract {
    // forwards have no strike and sit under 0
    pub fn strike_key(&self) -> Decimal {
        self.economics.strike.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("Invalid expiry {0}, expected YYYYMMDD")]
    InvalidExpiry(u32),
}

pub type StrikeMap = BTreeMap<Decimal, Contract>;
pub type PayoffMap = BTreeMap<String, StrikeMap>;

/// Tradeable contracts of `currency_pair`, grouped expiry -> payoff -> strike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractList {
    by_expiry: BTreeMap<Expiry, PayoffMap>,
}

impl ContractList {
    pub fn expiries(&self) -> impl Iterator<Item = &Expiry> {
        self.by_expiry.keys()
    }

    pub fn contracts_by_payoff(&self, expiry: Expiry, payoff: &OptionType) -> Option<&StrikeMap> {
        self.by_expiry.get(&expiry)?.get(payoff.as_str())
    }

    pub fn contract(&self, expiry: Expiry, payoff: &OptionType, strike: Decimal) -> Option<&Contract> {
        self.contracts_by_payoff(expiry, payoff)?.get(&strike)
    }

    pub fn strikes(&self, expiry: Expiry) -> BTreeSet<Decimal> {
        self.by_expiry
            .get(&expiry)
            .map(|payoffs| {
                payoffs
                    .iter()
                    .filter(|(payoff, _)| payoff.as_str() != OptionType::Forward.as_str())
                    .flat_map(|(_, strikes)| strikes.keys().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_expiry
            .values()
            .flat_map(|payoffs| payoffs.values())
            .map(|strikes| strikes.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn filter_contracts(contracts: &[Contract], currency_pair: &str) -> ContractList {
    let mut list = ContractList::default();
    for contract in contracts
        .iter()
        .filter(|c| c.tradeable && c.economics.currency_pair == currency_pair)
    {
        list.by_expiry
            .entry(contract.economics.expiry)
            .or_default()
            .entry(contract.payoff.as_str().to_string())
            .or_default()
            .insert(contract.strike_key(), contract.clone());
    }
    debug!(currency_pair, total = contracts.len(), kept = list.len(), "filtered contract list");
    list
}

/// Sorted, unique expiries of tradeable contracts for the pair.
pub fn expiry_list(contracts: &[Contract], currency_pair: &str) -> Vec<Expiry> {
    contracts
        .iter()
        .filter(|c| c.tradeable && c.economics.currency_pair == currency_pair)
        .map(|c| c.economics.expiry)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
