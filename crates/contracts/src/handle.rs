use alloy_primitives::{B256, TxHash};
use alloy_rpc_types_eth::TransactionRequest;
use serde::Serialize;
use std::fmt;

/// Lifecycle of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Submitted,
    Confirmed,
    Failed,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        })
    }
}

/// A transaction accepted by the wallet.
///
/// Handles are only created by write calls, always in [`TxStatus::Submitted`], and move into a
/// terminal state exactly once when passed by value to the
/// [`TransactionTracker`](crate::TransactionTracker).
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionHandle {
    hash: TxHash,
    status: TxStatus,
    receipt_hash: Option<TxHash>,
    request: TransactionRequest,
}

impl TransactionHandle {
    pub(crate) fn submitted(hash: TxHash, request: TransactionRequest) -> Self {
        Self { hash, status: TxStatus::Submitted, receipt_hash: None, request }
    }

    pub(crate) fn settle(mut self, status: TxStatus, receipt_hash: Option<TxHash>) -> Self {
        debug_assert_eq!(self.status, TxStatus::Submitted);
        self.status = status;
        self.receipt_hash = receipt_hash;
        self
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn status(&self) -> TxStatus {
        self.status
    }

    /// Hash reported by the receipt, once there is one.
    pub fn receipt_hash(&self) -> Option<TxHash> {
        self.receipt_hash
    }

    /// The request the wallet signed.
    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }
}

/// Proof that a transaction was mined successfully.
///
/// Only the tracker creates these, so holding one means the network reported a successful
/// receipt.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmedTransaction {
    handle: TransactionHandle,
    block_number: Option<u64>,
    block_hash: Option<B256>,
}

impl ConfirmedTransaction {
    pub(crate) fn new(
        handle: TransactionHandle,
        block_number: Option<u64>,
        block_hash: Option<B256>,
    ) -> Self {
        Self { handle, block_number, block_hash }
    }

    pub fn hash(&self) -> TxHash {
        self.handle.hash
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn block_hash(&self) -> Option<B256> {
        self.block_hash
    }

    pub fn handle(&self) -> &TransactionHandle {
        &self.handle
    }
}
