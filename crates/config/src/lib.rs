//! # polypay-config
//!
//! Polypay's configuration, layered from serialized defaults, a `polypay.toml` file and
//! `POLYPAY_`-prefixed environment variables, later layers winning.
//!
//! ```toml
//! chain_id = "0x89"
//! backend_url = "https://shop.example"
//! token_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
//! token_price = "0.01"
//!
//! [[networks]]
//! chainId = "0x539"
//! chainName = "Local"
//! nativeCurrency = { name = "Ether", symbol = "ETH", decimals = 18 }
//! rpcUrls = ["http://localhost:8545"]
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, U256, utils::parse_ether};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use polypay_networks::{NetworkProfile, NetworkRegistry, POLYGON_MAINNET_CHAIN_ID};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

mod error;
pub use error::{ConfigError, ExtractConfigError, FAILED_TO_EXTRACT_CONFIG_MSG};

/// Polypay configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network the wallet is kept on.
    #[serde(with = "polypay_networks::chain_id")]
    pub chain_id: u64,
    /// Base URL of the shop backend.
    pub backend_url: String,
    /// JSON-RPC endpoint of the wallet. Without one, there is no wallet provider.
    pub wallet_url: Option<String>,
    /// The shop's ERC20 token.
    pub token_address: Option<Address>,
    /// Token sale contract.
    pub sale_address: Option<Address>,
    /// DAO governance contract.
    pub dao_address: Option<Address>,
    /// Account receiving order payments.
    pub shop_receiver: Option<Address>,
    /// Price of one whole token in the native currency, e.g. `"0.01"`.
    pub token_price: String,
    /// Milliseconds between two receipt lookups.
    pub receipt_poll_interval_ms: u64,
    /// Networks in addition to the built-in Polygon profiles.
    pub networks: Vec<NetworkProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain_id: POLYGON_MAINNET_CHAIN_ID,
            backend_url: "http://localhost:5000".to_string(),
            wallet_url: None,
            token_address: None,
            sale_address: None,
            dao_address: None,
            shop_receiver: None,
            token_price: "0.01".to_string(),
            receipt_poll_interval_ms: 2_000,
            networks: Vec::new(),
        }
    }
}

impl Config {
    /// File name looked up in the current directory.
    pub const FILE_NAME: &'static str = "polypay.toml";

    /// Environment variable overriding the config file location.
    pub const FILE_ENV: &'static str = "POLYPAY_CONFIG";

    /// Prefix of environment variables overriding single settings.
    pub const ENV_PREFIX: &'static str = "POLYPAY_";

    /// Loads the configuration from the default figment.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::from_provider(Self::figment())
    }

    /// Extracts a `Config` from `provider`.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        Figment::from(provider).extract().map_err(ExtractConfigError::new)
    }

    /// The default figment: defaults, then the config file, then the environment.
    pub fn figment() -> Figment {
        Self::figment_with_file(Self::config_path())
    }

    /// Like [`figment`](Self::figment), reading the config file at `path`. A missing file is
    /// skipped.
    pub fn figment_with_file(path: impl AsRef<Path>) -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["config"]))
    }

    /// Path of the config file: `$POLYPAY_CONFIG` or `polypay.toml`.
    pub fn config_path() -> PathBuf {
        Env::var(Self::FILE_ENV).map(PathBuf::from).unwrap_or_else(|| Self::FILE_NAME.into())
    }

    /// Built-in networks plus the configured ones.
    pub fn registry(&self) -> Result<NetworkRegistry, ConfigError> {
        Ok(NetworkRegistry::polygon().extend(self.networks.iter().cloned())?)
    }

    /// Profile of the configured target chain.
    pub fn target_network(&self) -> Result<NetworkProfile, ConfigError> {
        Ok(self.registry()?.get_profile(self.chain_id)?.clone())
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    /// The token price in wei.
    pub fn token_price_wei(&self) -> Result<U256, ConfigError> {
        parse_ether(&self.token_price).map_err(|err| ConfigError::Price {
            price: self.token_price.clone(),
            reason: err.to_string(),
        })
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Polypay Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
