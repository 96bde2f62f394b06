use crate::ConfirmedTransaction;
use alloy_primitives::TxHash;
use serde::Serialize;

/// Links a shop order to the transaction that paid it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderPaymentRecord {
    order_id: u64,
    tx_hash: TxHash,
}

impl OrderPaymentRecord {
    pub fn new(order_id: u64, tx: &ConfirmedTransaction) -> Self {
        Self { order_id, tx_hash: tx.hash() }
    }

    pub fn order_id(&self) -> u64 {
        self.order_id
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }
}

/// What a confirmed transfer was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransferKind {
    Purchase { purchase_id: u64 },
    Vote { vote_id: u64 },
}

/// Confirms a token purchase or DAO vote the backend is tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferConfirmation {
    tx_hash: TxHash,
    #[serde(flatten)]
    kind: TransferKind,
}

impl TransferConfirmation {
    pub fn purchase(purchase_id: u64, tx: &ConfirmedTransaction) -> Self {
        Self { tx_hash: tx.hash(), kind: TransferKind::Purchase { purchase_id } }
    }

    pub fn vote(vote_id: u64, tx: &ConfirmedTransaction) -> Self {
        Self { tx_hash: tx.hash(), kind: TransferKind::Vote { vote_id } }
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    pub fn kind(&self) -> TransferKind {
        self.kind
    }
}
