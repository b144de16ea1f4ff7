// 6.0 config.rs: everything the pricing layer reads from outside.
// quoting params snapshot, currency precision, token decimals.
// 6.1 loads from TOML; missing sections fall back to defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::format::MAX_TOKEN_DECIMALS;
use crate::quoting::QuotingParams;
use crate::types::Currency;

/** 6.2: decimal places for order prices (strike) and sizes (underlying) */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPrecision {
    pub underlying: u32,
    pub strike: u32,
}

impl Default for CurrencyPrecision {
    fn default() -> Self {
        Self {
            underlying: 4,
            strike: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    // Currency pair shown on the trading screens
    pub currency_pair: String,
    // Spread snapshot used until the remote fetch succeeds
    pub quoting_params: QuotingParams,
    pub currency_precision: CurrencyPrecision,
    // ERC20 decimals per collateral token
    pub token_decimals: BTreeMap<Currency, u32>,
    // How often the outer layer refreshes balances and quoting params
    pub refresh_interval_ms: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let mut token_decimals = BTreeMap::new();
        token_decimals.insert(Currency::Weth, 18);
        token_decimals.insert(Currency::Usdc, 6);

        Self {
            currency_pair: "WETH/USDC".to_string(),
            quoting_params: QuotingParams::default(),
            currency_precision: CurrencyPrecision::default(),
            token_decimals,
            refresh_interval_ms: 10_000,
        }
    }
}

impl PricingConfig {
    // Testnet: same spreads, faster refresh
    pub fn testnet() -> Self {
        let mut config = Self::default();
        config.refresh_interval_ms = 5_000;
        config
    }

    // Mainnet: wider vanilla spread
    pub fn mainnet() -> Self {
        let mut config = Self::default();
        config.quoting_params.vanilla_spread = Some(Decimal::new(600, 2)); // 6.00
        config
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), pair = %config.currency_pair, "loaded pricing config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.currency_pair.contains('/') {
            return Err(ConfigError::InvalidValue(format!(
                "currency pair {:?} is not BASE/QUOTE",
                self.currency_pair
            )));
        }

        let spreads = [
            ("VANILLA_SPREAD", self.quoting_params.vanilla_spread),
            ("DIGITAL_SPREAD", self.quoting_params.digital_spread),
            ("FORWARD_SPREAD", self.quoting_params.forward_spread),
        ];
        for (name, value) in spreads {
            if let Some(v) = value {
                if v < Decimal::ZERO {
                    return Err(ConfigError::InvalidValue(format!("{name} must not be negative")));
                }
            }
        }

        for currency in Currency::ALL {
            match self.token_decimals.get(&currency) {
                None => {
                    return Err(ConfigError::InvalidValue(format!("no token decimals for {currency}")));
                }
                Some(&d) if d > MAX_TOKEN_DECIMALS => {
                    return Err(ConfigError::InvalidValue(format!(
                        "{currency} decimals {d} exceed {MAX_TOKEN_DECIMALS}"
                    )));
                }
                Some(_) => {}
            }
        }

        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue("refresh interval must be non-zero".to_string()));
        }

        Ok(())
    }

    // None when a hand-built config skipped validate()
    pub fn token_decimals(&self, currency: Currency) -> Option<u32> {
        self.token_decimals.get(&currency).copied()
    }

    // applies a fresh remote snapshot, keeping fields it lacks
    pub fn apply_quoting_params(&mut self, fresh: &QuotingParams) {
        self.quoting_params = self.quoting_params.merged_with(fresh);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Testnet,
    Mainnet,
}

impl Environment {
    pub fn config(&self) -> PricingConfig {
        match self {
            Environment::Development => PricingConfig::default(),
            Environment::Testnet => PricingConfig::testnet(),
            Environment::Mainnet => PricingConfig::mainnet(),
        }
    }
}
