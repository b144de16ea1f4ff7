// 4.0 format.rs: token units and display strings.
// on-chain amounts are integers in base units; the UI shows decimals
// rounded to each currency's display precision.

use crate::types::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

// rust_decimal carries at most 28 fractional digits
pub const MAX_TOKEN_DECIMALS: u32 = 28;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Negative amount {0}")]
    Negative(Decimal),

    #[error("{value} has more than {decimals} decimal places")]
    TooPrecise { value: Decimal, decimals: u32 },

    #[error("Token decimals {0} exceed the supported 28")]
    UnsupportedDecimals(u32),

    #[error("Amount out of range")]
    Overflow,
}

/// Base units to a decimal amount, e.g. 1_500_000 with 6 decimals is 1.5.
pub fn format_units(raw: u128, decimals: u32) -> Result<Decimal, FormatError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(FormatError::UnsupportedDecimals(decimals));
    }
    let raw = i128::try_from(raw).map_err(|_| FormatError::Overflow)?;
    Decimal::try_from_i128_with_scale(raw, decimals)
        .map(|d| d.normalize())
        .map_err(|_| FormatError::Overflow)
}

/// Decimal text to base units. Rejects negatives and excess precision.
pub fn parse_units(text: &str, decimals: u32) -> Result<u128, FormatError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(FormatError::UnsupportedDecimals(decimals));
    }
    let value = Decimal::from_str(text.trim())
        .map_err(|_| FormatError::NotANumber(text.to_string()))?
        .normalize();
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FormatError::Negative(value));
    }
    if value.scale() > decimals {
        return Err(FormatError::TooPrecise { value, decimals });
    }

    let mut mantissa = value.mantissa().unsigned_abs();
    for _ in value.scale()..decimals {
        mantissa = mantissa.checked_mul(10).ok_or(FormatError::Overflow)?;
    }
    Ok(mantissa)
}

pub fn format_fixed_places(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded.to_string()
}

/// Display string for an amount in `currency`, with thousands separators.
/// `precision` overrides the currency's default display places.
pub fn format_by_currency(value: Decimal, currency: Currency, precision: Option<u32>) -> String {
    let fixed = format_fixed_places(value, precision.unwrap_or_else(|| currency.display_precision()));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_with_symbol(value: Decimal, currency: Currency, precision: Option<u32>) -> String {
    format!("{} {}", format_by_currency(value, currency, precision), currency.symbol())
}

/// `0x1234...abcd` for anything that looks like an address, otherwise unchanged.
pub fn truncate_address(address: &str) -> String {
    if !is_address(address) {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

pub fn is_address(s: &str) -> bool {
    s.len() == 42 && s.starts_with("0x") && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

// leaderboard/user display name; the connected wallet reads as "You"
pub fn display_name(name: &str, wallet: Option<&str>, current_wallet: Option<&str>) -> String {
    if let (Some(w), Some(current)) = (wallet, current_wallet) {
        if w.eq_ignore_ascii_case(current) {
            return "You".to_string();
        }
    }
    truncate_address(name)
}
