//! Configuration errors.

use figment::providers::{Format, Toml};
use polypay_networks::RegistryError;
use std::{collections::HashSet, error::Error, fmt};

/// Message preceding the errors of a failed extraction.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract polypay config:";

/// Represents a failed attempt to extract [`Config`](crate::Config) from a `Figment`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut unique = HashSet::with_capacity(self.error.count());
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in self.error.clone() {
            let from_toml = err.metadata.as_ref().is_some_and(|meta| meta.name.contains(Toml::NAME));
            let mut line = if from_toml { format!("polypay.toml error: {err}") } else { err.to_string() };
            if !err.path.is_empty() {
                line.push_str(&format!(" for setting `{}`", err.path.join(".")));
            }
            if unique.insert(line.clone()) {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

/// A configuration that loaded but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Extract(#[from] ExtractConfigError),
    #[error("invalid `token_price` `{price}`: {reason}")]
    Price { price: String, reason: String },
    #[error(transparent)]
    Network(#[from] RegistryError),
}
