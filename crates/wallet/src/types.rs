use alloy_primitives::{B256, TxHash, U64};
use serde::{Deserialize, Serialize};

/// The fields of a transaction receipt polypay relies on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` if the transaction reverted. Absent before Byzantium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<U64>,
}

impl TxReceipt {
    /// A successful receipt, mostly useful for tests.
    pub fn success(transaction_hash: TxHash, block_number: u64) -> Self {
        Self {
            transaction_hash,
            block_hash: None,
            block_number: Some(U64::from(block_number)),
            status: Some(U64::from(1)),
        }
    }

    /// A reverted receipt, mostly useful for tests.
    pub fn reverted(transaction_hash: TxHash, block_number: u64) -> Self {
        Self { status: Some(U64::ZERO), ..Self::success(transaction_hash, block_number) }
    }

    /// Returns `Some(true)` if the receipt reports failure, `None` if it carries no status.
    pub fn is_failure(&self) -> Option<bool> {
        self.status.map(|status| status.is_zero())
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}
