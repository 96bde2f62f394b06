//! Chain id encoding.
//!
//! Wallets exchange chain ids as `0x`-prefixed lowercase hex strings without leading zeros, e.g.
//! `0x89` for Polygon. Configuration files are friendlier to plain decimals, so parsing accepts
//! both.

use serde::{Deserialize, Deserializer, Serializer};

/// Error returned when a chain id string is neither hex nor decimal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid chain id `{input}`")]
pub struct ChainIdError {
    input: String,
}

/// Parses a chain id from `0x`-hex (`"0x13881"`) or decimal (`"80001"`) notation.
pub fn parse_chain_id(input: &str) -> Result<u64, ChainIdError> {
    let trimmed = input.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() => u64::from_str_radix(hex, 16).ok(),
        Some(_) => None,
        None => trimmed.parse().ok(),
    };
    parsed.ok_or_else(|| ChainIdError { input: input.to_string() })
}

/// Formats a chain id the way wallets expect it: `0x`-prefixed lowercase hex.
pub fn format_chain_id(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}

/// Serializes a chain id as `0x`-hex, for `#[serde(with = "...")]`.
pub fn serialize<S: Serializer>(chain_id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_chain_id(*chain_id))
}

/// Deserializes a chain id from a number, a hex string or a decimal string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        String(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::String(s) => parse_chain_id(&s).map_err(serde::de::Error::custom),
    }
}
