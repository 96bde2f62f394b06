//! Wallet provider error bindings.
//!
//! Error codes follow [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193#provider-errors) for
//! wallet specific failures and [EIP-1474](https://eips.ethereum.org/EIPS/eip-1474#error-codes)
//! for the JSON-RPC ones.

use alloy_primitives::{Bytes, TxHash, hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Represents an error reported by the wallet provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: ErrorCode,
    /// error message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// New [`RpcError`] with the given [`ErrorCode`] and its default message.
    pub fn new(code: ErrorCode) -> Self {
        Self { message: code.message().to_string(), code, data: None }
    }

    /// New [`RpcError`] with a custom message.
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    /// Attaches `data` to the error.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The user declined the request in the wallet.
    pub fn user_rejected() -> Self {
        Self::new(ErrorCode::UserRejectedRequest)
    }

    /// The wallet does not know the requested chain.
    pub fn unrecognized_chain(chain_id_hex: &str) -> Self {
        Self::with_message(
            ErrorCode::UnrecognizedChain,
            format!("Unrecognized chain ID \"{chain_id_hex}\". Try adding the chain using wallet_addEthereumChain first."),
        )
    }

    /// The call reverted, `data` being the ABI encoded revert payload.
    pub fn execution_reverted(data: impl Into<Bytes>) -> Self {
        Self::with_message(ErrorCode::ExecutionError, "execution reverted")
            .with_data(Value::String(data.into().to_string()))
    }

    /// Code of the error that caused this one.
    ///
    /// Some wallets (MetaMask mobile among them) report every failure of
    /// `wallet_switchEthereumChain` as an internal error and keep the real code in
    /// `data.originalError.code`.
    pub fn effective_code(&self) -> ErrorCode {
        self.data
            .as_ref()
            .and_then(|data| data.get("originalError"))
            .and_then(|original| original.get("code"))
            .and_then(Value::as_i64)
            .map(ErrorCode::from)
            .unwrap_or(self.code)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.effective_code() == ErrorCode::UserRejectedRequest
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.effective_code() == ErrorCode::UnrecognizedChain
    }

    pub fn is_insufficient_funds(&self) -> bool {
        self.message.to_ascii_lowercase().contains("insufficient funds")
    }

    pub fn is_execution_reverted(&self) -> bool {
        self.code == ErrorCode::ExecutionError || self.message.contains("execution reverted")
    }

    /// The raw revert payload, if the provider attached one.
    ///
    /// Nodes put it directly in `data`, wallets tend to nest it as `data.data` or
    /// `data.originalError.data`.
    pub fn revert_data(&self) -> Option<Bytes> {
        let data = self.data.as_ref()?;
        [
            Some(data),
            data.get("data"),
            data.get("originalError").and_then(|original| original.get("data")),
        ]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find_map(|s| hex::decode(s).ok())
        .map(Bytes::from)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code.message(), self.code.code(), self.message)
    }
}

impl std::error::Error for RpcError {}

/// List of error codes a wallet provider can answer with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The user rejected the request.
    UserRejectedRequest,
    /// The requested method and/or account has not been authorized by the user.
    Unauthorized,
    /// The provider does not support the requested method.
    UnsupportedMethod,
    /// The provider is disconnected from all chains.
    Disconnected,
    /// The provider is not connected to the requested chain.
    ChainDisconnected,
    /// The chain has not been added to the wallet.
    UnrecognizedChain,
    /// Missing or invalid parameters; geth also reports `insufficient funds` with this code.
    InvalidInput,
    /// Requested resource not found.
    ResourceNotFound,
    /// Requested resource not available.
    ResourceUnavailable,
    /// Transaction creation failed.
    TransactionRejected,
    /// Method does not exist.
    MethodNotFound,
    /// Invalid method parameter.
    InvalidParams,
    /// Internal JSON-RPC error.
    InternalError,
    /// The call reverted during execution.
    ExecutionError,
    /// Any other code.
    Other(i64),
}

impl ErrorCode {
    /// Returns the error code as `i64`
    pub const fn code(&self) -> i64 {
        match *self {
            Self::UserRejectedRequest => 4001,
            Self::Unauthorized => 4100,
            Self::UnsupportedMethod => 4200,
            Self::Disconnected => 4900,
            Self::ChainDisconnected => 4901,
            Self::UnrecognizedChain => 4902,
            Self::InvalidInput => -32000,
            Self::ResourceNotFound => -32001,
            Self::ResourceUnavailable => -32002,
            Self::TransactionRejected => -32003,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::ExecutionError => 3,
            Self::Other(c) => c,
        }
    }

    /// Returns the message associated with the error
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::UserRejectedRequest => "User rejected the request",
            Self::Unauthorized => "Unauthorized",
            Self::UnsupportedMethod => "Unsupported method",
            Self::Disconnected => "Disconnected",
            Self::ChainDisconnected => "Chain disconnected",
            Self::UnrecognizedChain => "Unrecognized chain",
            Self::InvalidInput => "Invalid input",
            Self::ResourceNotFound => "Resource not found",
            Self::ResourceUnavailable => "Resource unavailable",
            Self::TransactionRejected => "Transaction rejected",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ExecutionError => "Execution error",
            Self::Other(_) => "Provider error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'a> Deserialize<'a> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'a>,
    {
        i64::deserialize(deserializer).map(Into::into)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            4001 => Self::UserRejectedRequest,
            4100 => Self::Unauthorized,
            4200 => Self::UnsupportedMethod,
            4900 => Self::Disconnected,
            4901 => Self::ChainDisconnected,
            4902 => Self::UnrecognizedChain,
            -32000 => Self::InvalidInput,
            -32001 => Self::ResourceNotFound,
            -32002 => Self::ResourceUnavailable,
            -32003 => Self::TransactionRejected,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            3 => Self::ExecutionError,
            _ => Self::Other(code),
        }
    }
}

/// Any failure of a single request to the wallet provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("wallet transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to encode wallet request: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unexpected response to `{method}`: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("transaction {0} was dropped by the network")]
    Dropped(TxHash),
}

impl ProviderError {
    /// The wallet's own error, if this is one.
    pub fn as_rpc(&self) -> Option<&RpcError> {
        match self {
            Self::Rpc(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.as_rpc().is_some_and(RpcError::is_user_rejection)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.as_rpc().is_some_and(RpcError::is_unrecognized_chain)
    }
}

/// Errors surfaced by the [`SessionManager`](crate::SessionManager).
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("no wallet provider detected, install a browser wallet such as MetaMask")]
    ProviderUnavailable,
    #[error("the request was rejected in the wallet")]
    UserRejected,
    #[error("the wallet does not recognize chain {0}")]
    UnrecognizedChain(String),
    #[error("the wallet returned no accounts")]
    NoAccounts,
    #[error(transparent)]
    Provider(ProviderError),
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        if err.is_user_rejection() { Self::UserRejected } else { Self::Provider(err) }
    }
}
