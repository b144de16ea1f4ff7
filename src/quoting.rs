//! Quoting parameters and spread sources.
//!
//! The quoting params snapshot comes from the remote config endpoint and may
//! be missing any of its fields. A pricing call takes its spread either from
//! that snapshot or from a caller-forced value, never both.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Per-product spread constants.
///
/// `vanilla_spread` is in basis points of basis points of spot, the digital
/// and forward spreads are absolute price units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotingParams {
    #[serde(rename = "VANILLA_SPREAD", default, skip_serializing_if = "Option::is_none")]
    pub vanilla_spread: Option<Decimal>,
    #[serde(rename = "DIGITAL_SPREAD", default, skip_serializing_if = "Option::is_none")]
    pub digital_spread: Option<Decimal>,
    #[serde(rename = "FORWARD_SPREAD", default, skip_serializing_if = "Option::is_none")]
    pub forward_spread: Option<Decimal>,
}

impl Default for QuotingParams {
    fn default() -> Self {
        Self {
            vanilla_spread: Some(dec!(5.25)),
            digital_spread: Some(dec!(0.05)),
            forward_spread: Some(dec!(1.05)),
        }
    }
}

impl QuotingParams {
    pub fn empty() -> Self {
        Self {
            vanilla_spread: None,
            digital_spread: None,
            forward_spread: None,
        }
    }

    // fields present in `fresh` win, the rest keep the current values
    pub fn merged_with(&self, fresh: &QuotingParams) -> Self {
        Self {
            vanilla_spread: fresh.vanilla_spread.or(self.vanilla_spread),
            digital_spread: fresh.digital_spread.or(self.digital_spread),
            forward_spread: fresh.forward_spread.or(self.forward_spread),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.vanilla_spread.is_some() && self.digital_spread.is_some() && self.forward_spread.is_some()
    }
}

/// Where the spread for a pricing call comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadSource {
    /// Caller override, replaces the quoting params spread for non-forward types.
    Forced(Decimal),
    /// Snapshot of the remote quoting params.
    Quoting(QuotingParams),
}

impl SpreadSource {
    pub fn quoting_params(&self) -> Option<&QuotingParams> {
        match self {
            SpreadSource::Quoting(params) => Some(params),
            SpreadSource::Forced(_) => None,
        }
    }

    pub fn forced_spread(&self) -> Option<Decimal> {
        match self {
            SpreadSource::Forced(spread) => Some(*spread),
            SpreadSource::Quoting(_) => None,
        }
    }
}

impl From<QuotingParams> for SpreadSource {
    fn from(params: QuotingParams) -> Self {
        SpreadSource::Quoting(params)
    }
}
