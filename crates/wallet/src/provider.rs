use crate::{
    EthereumRequest, ProviderError, TxReceipt,
    request::{BlockTag, SwitchChainParameter},
};
use alloy_primitives::{Address, Bytes, TxHash, U64};
use alloy_rpc_types_eth::TransactionRequest;
use async_trait::async_trait;
use polypay_networks::NetworkProfile;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, time::Duration};

/// Default interval between two receipt lookups while waiting for a transaction.
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// The wallet as seen from polypay: account access, network switching, calls and transaction
/// submission. Signing happens inside the wallet, `send_transaction` signs and broadcasts in one
/// step.
#[async_trait]
pub trait WalletProvider: Send + Sync + fmt::Debug {
    /// Prompts the user for account access.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Accounts the user already authorized; never prompts.
    async fn authorized_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// The chain the wallet is currently on.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Asks the wallet to switch to `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

    /// Asks the wallet to register `profile`.
    async fn add_chain(&self, profile: &NetworkProfile) -> Result<(), ProviderError>;

    /// Executes a read-only call.
    async fn call(&self, tx: &TransactionRequest, block: BlockTag) -> Result<Bytes, ProviderError>;

    /// Signs and broadcasts `tx`, returning its hash once the network accepted it.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError>;

    /// Suspends until the network reports a receipt for `hash`.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxReceipt, ProviderError>;
}

/// Delivers raw EIP-1193 requests to a wallet and returns the raw `result`.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn request(&self, request: &EthereumRequest) -> Result<Value, ProviderError>;
}

/// [`WalletProvider`] speaking EIP-1193 over any [`Transport`].
#[derive(Debug)]
pub struct Eip1193Provider<T> {
    transport: T,
    poll_interval: Duration,
}

impl<T: Transport> Eip1193Provider<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL }
    }

    /// Sets the interval between receipt lookups.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn request<R: DeserializeOwned>(&self, request: EthereumRequest) -> Result<R, ProviderError> {
        let method = request.method();
        if request.is_interactive() {
            debug!(target: "polypay::wallet", method, "waiting for the user to answer in the wallet");
        } else {
            trace!(target: "polypay::wallet", method, "sending wallet request");
        }
        let value = self.transport.request(&request).await.inspect_err(|err| {
            debug!(target: "polypay::wallet", method, %err, "wallet request failed");
        })?;
        serde_json::from_value(value).map_err(|source| ProviderError::Decode { method, source })
    }
}

#[async_trait]
impl<T: Transport> WalletProvider for Eip1193Provider<T> {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request(EthereumRequest::RequestAccounts).await
    }

    async fn authorized_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request(EthereumRequest::Accounts).await
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let id: U64 = self.request(EthereumRequest::ChainId).await?;
        Ok(id.to())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        // Wallets answer `null` on success.
        let _: Value =
            self.request(EthereumRequest::SwitchChain([SwitchChainParameter::new(chain_id)])).await?;
        Ok(())
    }

    async fn add_chain(&self, profile: &NetworkProfile) -> Result<(), ProviderError> {
        let _: Value = self.request(EthereumRequest::AddChain([profile.clone()])).await?;
        Ok(())
    }

    async fn call(&self, tx: &TransactionRequest, block: BlockTag) -> Result<Bytes, ProviderError> {
        self.request(EthereumRequest::Call(tx.clone(), block)).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        self.request(EthereumRequest::SendTransaction([tx.clone()])).await
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxReceipt, ProviderError> {
        // A transaction the node once reported as pending and then forgot without a receipt
        // was dropped or replaced.
        let mut seen = false;
        loop {
            if let Some(receipt) =
                self.request::<Option<TxReceipt>>(EthereumRequest::GetTransactionReceipt([hash])).await?
            {
                return Ok(receipt);
            }

            let pending: Option<Value> =
                self.request(EthereumRequest::GetTransactionByHash([hash])).await?;
            match pending {
                Some(_) => seen = true,
                None if seen => return Err(ProviderError::Dropped(hash)),
                None => {}
            }

            trace!(target: "polypay::wallet", %hash, "transaction pending");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
