use crate::{AmountError, TransactionHandle};
use alloy_primitives::TxHash;
use polypay_wallet::{ProviderError, RpcError};
use std::fmt;

/// Reason a call reverted, if one could be recovered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevertReason(pub Option<String>);

impl RevertReason {
    /// Extracts the reason from a provider error: first from the ABI encoded revert data, then
    /// from an `execution reverted: <reason>` message.
    pub fn from_rpc(err: &RpcError) -> Self {
        const PREFIX: &str = "execution reverted: ";

        let decoded = err
            .revert_data()
            .and_then(|data| alloy_sol_types::decode_revert_reason(&data))
            .map(|reason| reason.strip_prefix("revert: ").map(str::to_string).unwrap_or(reason))
            .filter(|reason| !reason.is_empty());
        let from_message = || {
            err.message
                .find(PREFIX)
                .map(|idx| err.message[idx + PREFIX.len()..].trim().to_string())
                .filter(|reason| !reason.is_empty())
        };
        Self(decoded.or_else(from_message))
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(reason) => f.write_str(reason),
            None => f.write_str("no reason given"),
        }
    }
}

/// Errors of the [`ContractGateway`](crate::ContractGateway).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no wallet connected")]
    NotConnected,
    #[error("the transaction was rejected in the wallet")]
    UserRejected,
    #[error("insufficient funds to pay for the transaction")]
    InsufficientFunds,
    #[error("execution reverted: {reason}")]
    CallReverted { reason: RevertReason },
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("could not decode the result of `{function}`: {source}")]
    Decode {
        function: &'static str,
        #[source]
        source: alloy_sol_types::Error,
    },
    #[error("network error: {0}")]
    Network(#[source] ProviderError),
}

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        let Some(rpc) = err.as_rpc() else { return Self::Network(err) };
        if rpc.is_user_rejection() {
            Self::UserRejected
        } else if rpc.is_insufficient_funds() {
            Self::InsufficientFunds
        } else if rpc.is_execution_reverted() {
            Self::CallReverted { reason: RevertReason::from_rpc(rpc) }
        } else {
            Self::Network(err)
        }
    }
}

/// Errors of the [`TransactionTracker`](crate::TransactionTracker).
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The transaction was mined and reverted.
    #[error("transaction {} failed: {reason}", .handle.hash())]
    Failed { handle: Box<TransactionHandle>, reason: RevertReason },
    /// The network forgot the transaction. It may have been replaced under another hash.
    #[error("transaction {} was dropped or replaced", .handle.hash())]
    Dropped { handle: Box<TransactionHandle> },
    /// The outcome is unknown; the transaction may still be mined.
    #[error("lost track of transaction {hash}: {source}")]
    Network {
        hash: TxHash,
        #[source]
        source: ProviderError,
    },
}
