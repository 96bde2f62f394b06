use crate::{
    ConfirmedTransaction, RevertReason, TrackerError, TransactionHandle, TxStatus,
};
use polypay_wallet::{BlockTag, ProviderError, TxReceipt, WalletProvider};
use std::sync::Arc;

/// Waits for submitted transactions to be mined.
///
/// There is no client side timeout: a transaction that is neither mined nor dropped keeps the
/// caller waiting, as the wallet may still broadcast it.
#[derive(Clone, Debug)]
pub struct TransactionTracker {
    provider: Arc<dyn WalletProvider>,
}

impl TransactionTracker {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }

    /// Suspends until `handle` is mined and settles it.
    pub async fn wait(&self, handle: TransactionHandle) -> Result<ConfirmedTransaction, TrackerError> {
        let hash = handle.hash();
        debug!(target: "polypay::contracts", %hash, "waiting for receipt");

        let receipt = match self.provider.wait_for_receipt(hash).await {
            Ok(receipt) => receipt,
            Err(ProviderError::Dropped(_)) => {
                warn!(target: "polypay::contracts", %hash, "transaction dropped");
                let handle = handle.settle(TxStatus::Failed, None);
                return Err(TrackerError::Dropped { handle: Box::new(handle) });
            }
            Err(source) => return Err(TrackerError::Network { hash, source }),
        };

        // Receipts without a status predate Byzantium; being mined is all they tell.
        if receipt.is_failure() == Some(true) {
            let reason = self.revert_reason(&handle, &receipt).await;
            warn!(target: "polypay::contracts", %hash, %reason, "transaction reverted");
            let handle = handle.settle(TxStatus::Failed, Some(receipt.transaction_hash));
            return Err(TrackerError::Failed { handle: Box::new(handle), reason });
        }

        info!(target: "polypay::contracts", %hash, block = ?receipt.block_number(), "transaction confirmed");
        let block_number = receipt.block_number();
        let handle = handle.settle(TxStatus::Confirmed, Some(receipt.transaction_hash));
        Ok(ConfirmedTransaction::new(handle, block_number, receipt.block_hash))
    }

    /// Replays the failed transaction as a call at its block to recover the revert reason.
    async fn revert_reason(&self, handle: &TransactionHandle, receipt: &TxReceipt) -> RevertReason {
        let Some(block) = receipt.block_number() else { return RevertReason(None) };
        match self.provider.call(handle.request(), BlockTag::Number(block)).await {
            Err(ProviderError::Rpc(err)) => RevertReason::from_rpc(&err),
            Err(err) => {
                debug!(target: "polypay::contracts", %err, "could not replay failed transaction");
                RevertReason(None)
            }
            Ok(_) => RevertReason(None),
        }
    }
}
