//! Human readable token amounts.

use alloy_primitives::{
    U256,
    utils::{ParseUnits, Unit},
};
use std::{fmt, str::FromStr};

/// Errors raised while converting amounts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must not be empty")]
    Empty,
    #[error("amount must not be negative: {0}")]
    Negative(String),
    #[error("invalid amount `{0}`")]
    Malformed(String),
    #[error("amount must be greater than zero")]
    Zero,
    #[error("`{amount}` has more than {decimals} decimals")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("unsupported token decimals: {0}")]
    Decimals(u8),
    #[error("amount overflows 256 bits")]
    Overflow,
}

/// A non-negative decimal amount as typed by a user, e.g. `"12.5"`.
///
/// Parsing only checks the syntax, the scale is applied with [`Amount::to_base_units`] once the
/// token's decimals are known.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether every digit is zero.
    pub fn is_zero(&self) -> bool {
        self.0.chars().all(|c| c == '0' || c == '.')
    }

    /// Number of digits after the decimal point.
    fn fraction_digits(&self) -> usize {
        self.0.split_once('.').map_or(0, |(_, fraction)| fraction.len())
    }

    /// Scales the amount to an integer of base units.
    pub fn to_base_units(&self, decimals: u8) -> Result<U256, AmountError> {
        if self.fraction_digits() > decimals as usize {
            return Err(AmountError::TooPrecise { amount: self.0.clone(), decimals });
        }
        let unit = Unit::new(decimals).ok_or(AmountError::Decimals(decimals))?;
        match ParseUnits::parse_units(&self.0, unit) {
            Ok(ParseUnits::U256(value)) => Ok(value),
            Ok(ParseUnits::I256(_)) => Err(AmountError::Negative(self.0.clone())),
            Err(_) => Err(AmountError::Overflow),
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative(s.to_string()));
        }

        let (int, fraction) = s.split_once('.').unwrap_or((s, ""));
        let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !digits(int) || !digits(fraction) || (int.is_empty() && fraction.is_empty()) {
            return Err(AmountError::Malformed(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats base units with `decimals`, trimming trailing zeros: `12500000` with 6 decimals is
/// `"12.5"`.
pub fn format_base_units(value: U256, decimals: u8) -> Result<String, AmountError> {
    let unit = Unit::new(decimals).ok_or(AmountError::Decimals(decimals))?;
    let formatted = ParseUnits::U256(value).format_units(unit);
    Ok(match formatted.split_once('.') {
        Some((int, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() { int.to_string() } else { format!("{int}.{fraction}") }
        }
        None => formatted,
    })
}

/// Native value to attach when buying `amount` base units of a token with `decimals` at
/// `price_per_token` wei per whole token.
pub fn purchase_cost(price_per_token: U256, amount: U256, decimals: u8) -> Result<U256, AmountError> {
    let scale = U256::from(10).checked_pow(U256::from(decimals)).ok_or(AmountError::Decimals(decimals))?;
    Ok(price_per_token.checked_mul(amount).ok_or(AmountError::Overflow)? / scale)
}
