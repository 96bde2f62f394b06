use crate::{OrderPaymentRecord, ReconciliationError, TransferConfirmation};
use alloy_primitives::TxHash;
use parking_lot::Mutex;
use reqwest::{Client, Url};
use serde::Serialize;
use std::collections::HashSet;

/// Endpoint recording order payments.
pub const PAYMENT_PATH: &str = "api/token/transfer";
/// Endpoint confirming purchases and votes.
pub const TRANSFER_CONFIRM_PATH: &str = "api/token/transfer/confirm";

/// Acknowledgement of a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ack {
    pub tx_hash: TxHash,
}

/// HTTP client of the shop backend.
#[derive(Debug)]
pub struct OrderReconciler {
    client: Client,
    base_url: Url,
    reported: Mutex<HashSet<(&'static str, TxHash)>>,
}

impl OrderReconciler {
    pub fn new(base_url: &str) -> Result<Self, ReconciliationError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ReconciliationError> {
        // A base without trailing slash would lose its last segment on join.
        let normalized =
            if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
        let base_url = Url::parse(&normalized).map_err(|err| ReconciliationError::InvalidUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { client, base_url, reported: Mutex::default() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Records that `record`'s order was paid.
    pub async fn report_payment(&self, record: &OrderPaymentRecord) -> Result<Ack, ReconciliationError> {
        debug!(target: "polypay::orders", order_id = record.order_id(), tx = %record.tx_hash(), "reporting payment");
        self.post_once(PAYMENT_PATH, record.tx_hash(), record).await
    }

    /// Confirms a token purchase or vote.
    pub async fn confirm_transfer(
        &self,
        confirmation: &TransferConfirmation,
    ) -> Result<Ack, ReconciliationError> {
        debug!(target: "polypay::orders", kind = ?confirmation.kind(), tx = %confirmation.tx_hash(), "confirming transfer");
        self.post_once(TRANSFER_CONFIRM_PATH, confirmation.tx_hash(), confirmation).await
    }

    /// Whether `tx_hash` was already sent to `path`.
    pub fn was_reported(&self, path: &'static str, tx_hash: TxHash) -> bool {
        self.reported.lock().contains(&(path, tx_hash))
    }

    /// Posts `body`, unless `tx_hash` was already sent to `path`. A failed attempt still counts.
    async fn post_once<B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        tx_hash: TxHash,
        body: &B,
    ) -> Result<Ack, ReconciliationError> {
        if !self.reported.lock().insert((path, tx_hash)) {
            warn!(target: "polypay::orders", %tx_hash, path, "refusing to report twice");
            return Err(ReconciliationError::AlreadyReported(tx_hash));
        }

        let url = self.base_url.join(path).map_err(|err| ReconciliationError::InvalidUrl {
            url: self.base_url.to_string(),
            reason: err.to_string(),
        })?;
        let response = self.client.post(url).json(body).send().await.inspect_err(|err| {
            error!(target: "polypay::orders", %tx_hash, %err, "backend unreachable");
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(target: "polypay::orders", %tx_hash, %status, "backend rejected report");
            return Err(ReconciliationError::Status { status, body });
        }

        info!(target: "polypay::orders", %tx_hash, path, "backend acknowledged");
        Ok(Ack { tx_hash })
    }
}
