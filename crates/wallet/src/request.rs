use alloy_primitives::TxHash;
use alloy_rpc_types_eth::TransactionRequest;
use polypay_networks::{NetworkProfile, format_chain_id};
use serde::Serialize;

/// Parameter of `wallet_switchEthereumChain`, see
/// [EIP-3326](https://eips.ethereum.org/EIPS/eip-3326).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParameter {
    pub chain_id: String,
}

impl SwitchChainParameter {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id: format_chain_id(chain_id) }
    }
}

/// Block selector for `eth_call`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockTag {
    #[default]
    Latest,
    Number(u64),
}

impl Serialize for BlockTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Latest => serializer.serialize_str("latest"),
            Self::Number(n) => serializer.serialize_str(&format!("{n:#x}")),
        }
    }
}

/// The subset of the [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193) request surface polypay
/// uses, serialized as `{"method": .., "params": [..]}`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum EthereumRequest {
    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,

    #[serde(rename = "eth_accounts")]
    Accounts,

    #[serde(rename = "eth_chainId")]
    ChainId,

    #[serde(rename = "wallet_switchEthereumChain")]
    SwitchChain([SwitchChainParameter; 1]),

    #[serde(rename = "wallet_addEthereumChain")]
    AddChain([NetworkProfile; 1]),

    #[serde(rename = "eth_call")]
    Call(TransactionRequest, BlockTag),

    #[serde(rename = "eth_sendTransaction")]
    SendTransaction([TransactionRequest; 1]),

    #[serde(rename = "eth_getTransactionReceipt")]
    GetTransactionReceipt([TxHash; 1]),

    #[serde(rename = "eth_getTransactionByHash")]
    GetTransactionByHash([TxHash; 1]),
}

impl EthereumRequest {
    /// The JSON-RPC method name.
    pub const fn method(&self) -> &'static str {
        match self {
            Self::RequestAccounts => "eth_requestAccounts",
            Self::Accounts => "eth_accounts",
            Self::ChainId => "eth_chainId",
            Self::SwitchChain(_) => "wallet_switchEthereumChain",
            Self::AddChain(_) => "wallet_addEthereumChain",
            Self::Call(..) => "eth_call",
            Self::SendTransaction(_) => "eth_sendTransaction",
            Self::GetTransactionReceipt(_) => "eth_getTransactionReceipt",
            Self::GetTransactionByHash(_) => "eth_getTransactionByHash",
        }
    }

    /// Whether the wallet may show a prompt to the user for this request.
    pub const fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::RequestAccounts | Self::SwitchChain(_) | Self::AddChain(_) | Self::SendTransaction(_)
        )
    }
}
