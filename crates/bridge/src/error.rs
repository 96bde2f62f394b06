use crate::{Notice, RetryHint};
use alloy_primitives::TxHash;
use polypay_contracts::{AmountError, GatewayError, TrackerError};
use polypay_orders::ReconciliationError;
use polypay_wallet::WalletError;

/// Failure of one step of an action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    /// The transaction is confirmed but the backend does not know.
    #[error("transaction {tx_hash} confirmed but not recorded: {source}")]
    Reconciliation {
        tx_hash: TxHash,
        #[source]
        source: ReconciliationError,
    },
    #[error("`{0}` is not configured")]
    NotConfigured(&'static str),
}

impl ActionError {
    /// Renders the error for the user.
    ///
    /// `explorer` links a transaction hash to a block explorer page.
    pub fn notice(&self, explorer: impl Fn(TxHash) -> Option<String>) -> Notice {
        match self {
            Self::Wallet(err) => wallet_notice(err),
            Self::Gateway(err) => gateway_notice(err),
            Self::Tracker(TrackerError::Failed { handle, reason }) => {
                let message = match &reason.0 {
                    Some(reason) => format!("Transaction failed: {reason}"),
                    None => "Transaction failed".to_string(),
                };
                Notice::error(message, RetryHint::SafeToRetry)
                    .with_tx(handle.hash(), explorer(handle.hash()))
            }
            Self::Tracker(TrackerError::Dropped { handle }) => Notice::warning(
                "The transaction was dropped or replaced. Check your wallet before paying again",
                RetryHint::DoNotRetry,
            )
            .with_tx(handle.hash(), explorer(handle.hash())),
            Self::Tracker(TrackerError::Network { hash, .. }) => Notice::warning(
                "Lost track of the transaction. Check its status before trying again",
                RetryHint::DoNotRetry,
            )
            .with_tx(*hash, explorer(*hash)),
            Self::Reconciliation { tx_hash, .. } => Notice::warning(
                "Transaction confirmed on chain, but the shop could not be notified. Do not send it again; contact support with the transaction hash",
                RetryHint::DoNotRetry,
            )
            .with_tx(*tx_hash, explorer(*tx_hash)),
            Self::NotConfigured(field) => {
                Notice::error(format!("Shop is not configured: missing {field}"), RetryHint::None)
            }
        }
    }
}

fn wallet_notice(err: &WalletError) -> Notice {
    match err {
        WalletError::ProviderUnavailable => Notice::error(
            "No wallet found. Install MetaMask or another browser wallet to continue",
            RetryHint::InstallWallet,
        ),
        WalletError::UserRejected => {
            Notice::warning("Request rejected in the wallet", RetryHint::SafeToRetry)
        }
        WalletError::UnrecognizedChain(chain) => Notice::error(
            format!("The wallet could not switch to network {chain}. Add it manually and try again"),
            RetryHint::SafeToRetry,
        ),
        WalletError::NoAccounts => {
            Notice::error("The wallet has no accounts to connect", RetryHint::SafeToRetry)
        }
        WalletError::Provider(err) => {
            Notice::error(format!("Wallet error: {err}. Please try again"), RetryHint::SafeToRetry)
        }
    }
}

fn gateway_notice(err: &GatewayError) -> Notice {
    match err {
        GatewayError::NotConnected => {
            Notice::warning("Connect your wallet first", RetryHint::SafeToRetry)
        }
        GatewayError::UserRejected => {
            Notice::warning("Transaction rejected in the wallet", RetryHint::SafeToRetry)
        }
        GatewayError::InsufficientFunds => Notice::error(
            "Insufficient funds to pay for this transaction",
            RetryHint::SafeToRetry,
        ),
        GatewayError::CallReverted { reason } => match &reason.0 {
            Some(reason) => {
                Notice::error(format!("The contract rejected the call: {reason}"), RetryHint::SafeToRetry)
            }
            None => Notice::error("The contract rejected the call", RetryHint::SafeToRetry),
        },
        GatewayError::Amount(AmountError::Zero) => {
            Notice::error("Enter an amount greater than zero", RetryHint::SafeToRetry)
        }
        GatewayError::Amount(err) => Notice::error(format!("Invalid amount: {err}"), RetryHint::SafeToRetry),
        GatewayError::Decode { .. } => {
            Notice::error("Unexpected answer from the contract", RetryHint::SafeToRetry)
        }
        GatewayError::Network(err) => {
            Notice::error(format!("Network error: {err}. Please try again"), RetryHint::SafeToRetry)
        }
    }
}
