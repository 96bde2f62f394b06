use crate::chain_id;
use alloy_chains::NamedChain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain id of Polygon PoS mainnet (`0x89`).
pub const POLYGON_MAINNET_CHAIN_ID: u64 = NamedChain::Polygon as u64;

/// Chain id of the Polygon Mumbai testnet (`0x13881`).
pub const POLYGON_MUMBAI_CHAIN_ID: u64 = 80001;

/// The native currency of a network, as a wallet displays it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl NativeCurrency {
    /// MATIC, the gas token of both Polygon networks.
    pub fn matic() -> Self {
        Self { name: "MATIC".to_string(), symbol: "MATIC".to_string(), decimals: 18 }
    }
}

/// Describes a network well enough for a wallet to register and switch to it.
///
/// Serializes as the EIP-3085 `AddEthereumChainParameter`:
///
/// ```json
/// {
///   "chainId": "0x89",
///   "chainName": "Polygon Mainnet",
///   "nativeCurrency": { "name": "MATIC", "symbol": "MATIC", "decimals": 18 },
///   "rpcUrls": ["https://polygon-rpc.com/"],
///   "blockExplorerUrls": ["https://polygonscan.com/"]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(with = "chain_id")]
    pub chain_id: u64,
    #[serde(rename = "chainName")]
    pub name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    #[serde(rename = "blockExplorerUrls", default)]
    pub explorer_urls: Vec<String>,
}

impl NetworkProfile {
    /// Polygon PoS mainnet.
    pub fn polygon_mainnet() -> Self {
        Self {
            chain_id: POLYGON_MAINNET_CHAIN_ID,
            name: "Polygon Mainnet".to_string(),
            native_currency: NativeCurrency::matic(),
            rpc_urls: vec!["https://polygon-rpc.com/".to_string()],
            explorer_urls: vec!["https://polygonscan.com/".to_string()],
        }
    }

    /// Polygon Mumbai testnet.
    pub fn polygon_mumbai() -> Self {
        Self {
            chain_id: POLYGON_MUMBAI_CHAIN_ID,
            name: "Polygon Mumbai Testnet".to_string(),
            native_currency: NativeCurrency::matic(),
            rpc_urls: vec!["https://rpc-mumbai.maticvigil.com/".to_string()],
            explorer_urls: vec!["https://mumbai.polygonscan.com/".to_string()],
        }
    }

    /// The chain id in the `0x`-hex form wallets expect.
    pub fn chain_id_hex(&self) -> String {
        chain_id::format_chain_id(self.chain_id)
    }

    /// Link to a transaction on the first configured block explorer, if any.
    pub fn explorer_tx_url(&self, tx_hash: impl fmt::Display) -> Option<String> {
        let base = self.explorer_urls.first()?;
        Some(format!("{}/tx/{tx_hash}", base.trim_end_matches('/')))
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id_hex())
    }
}
