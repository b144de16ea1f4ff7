// 1.0: primitives shared by pricing, orders and collateral.
// side, option type, currency, and the positive Price newtype.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// order side as the auction SDK spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn sign(&self) -> Decimal {
        match self {
            Side::Buy => dec!(1),
            Side::Sell => dec!(-1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(UnknownSide(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown side {0:?}, expected BUY or SELL")]
pub struct UnknownSide(pub String);

// 1.1: product family. payoff names match the SDK contract list.
// anything we don't recognise is kept verbatim in Unlisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptionType {
    Call,
    Put,
    BinaryCall,
    BinaryPut,
    Forward,
    Unlisted(String),
}

impl OptionType {
    pub fn is_binary(&self) -> bool {
        matches!(self, OptionType::BinaryCall | OptionType::BinaryPut)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, OptionType::Forward)
    }

    pub fn as_str(&self) -> &str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
            OptionType::BinaryCall => "BinaryCall",
            OptionType::BinaryPut => "BinaryPut",
            OptionType::Forward => "Forward",
            OptionType::Unlisted(name) => name,
        }
    }
}

impl From<&str> for OptionType {
    fn from(s: &str) -> Self {
        match s {
            "Call" => OptionType::Call,
            "Put" => OptionType::Put,
            "BinaryCall" => OptionType::BinaryCall,
            "BinaryPut" => OptionType::BinaryPut,
            "Forward" => OptionType::Forward,
            other => OptionType::Unlisted(other.to_string()),
        }
    }
}

impl From<String> for OptionType {
    fn from(s: String) -> Self {
        OptionType::from(s.as_str())
    }
}

impl From<OptionType> for String {
    fn from(t: OptionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 1.2: collateral currencies. WETH is the underlying, USDC the numeraire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Weth,
    Usdc,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Weth, Currency::Usdc];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Weth => "WETH",
            Currency::Usdc => "USDC",
        }
    }

    // places shown in balance panels
    pub fn display_precision(&self) -> u32 {
        match self {
            Currency::Weth => 4,
            Currency::Usdc => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// 1.3: a quoted price. strictly positive once it leaves the pricing engine.
// decoding goes through Price::new so a payload can't smuggle in zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: Decimal) -> Self {
        debug_assert!(value > Decimal::ZERO);
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = NonPositivePrice;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NonPositivePrice(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("price must be strictly positive, got {0}")]
pub struct NonPositivePrice(pub Decimal);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
