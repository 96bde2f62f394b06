use crate::{GatewayError, TransactionHandle};
use alloy_primitives::{Address, TxKind, U256};
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use polypay_wallet::{BlockTag, SessionHandle, SessionManager, WalletError, WalletProvider};
use std::sync::Arc;

/// Encodes typed contract calls, runs them through the wallet and decodes the results.
#[derive(Clone, Debug)]
pub struct ContractGateway {
    provider: Arc<dyn WalletProvider>,
    session: SessionHandle,
}

impl ContractGateway {
    pub fn new(provider: Arc<dyn WalletProvider>, session: SessionHandle) -> Self {
        Self { provider, session }
    }

    /// A gateway sharing the provider and session of `manager`.
    pub fn from_manager(manager: &SessionManager) -> Result<Self, WalletError> {
        Ok(Self::new(manager.provider()?.clone(), manager.session().clone()))
    }

    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    /// Executes `call` against `to` with `eth_call`, without a signature.
    ///
    /// The call is made from the session account when there is one, so functions depending on
    /// `msg.sender` preview what a transaction would do.
    pub async fn read_call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return, GatewayError> {
        let tx = TransactionRequest {
            from: self.session.account(),
            ..request(to, call)
        };
        trace!(target: "polypay::contracts", %to, function = C::SIGNATURE, "eth_call");
        let output = self.provider.call(&tx, BlockTag::Latest).await?;
        C::abi_decode_returns(&output)
            .map_err(|source| GatewayError::Decode { function: C::SIGNATURE, source })
    }

    /// Submits `call` to `to` as a transaction signed by the session account, attaching `value`
    /// of the native currency.
    pub async fn write_call<C: SolCall>(
        &self,
        to: Address,
        call: &C,
        value: Option<U256>,
    ) -> Result<TransactionHandle, GatewayError> {
        let session = self.session.snapshot();
        let from = session.account().filter(|_| session.is_connected()).ok_or(GatewayError::NotConnected)?;

        let tx = TransactionRequest { from: Some(from), value, ..request(to, call) };
        debug!(target: "polypay::contracts", %from, %to, function = C::SIGNATURE, ?value, "submitting transaction");
        let hash = self.provider.send_transaction(&tx).await.inspect_err(|err| {
            debug!(target: "polypay::contracts", %err, function = C::SIGNATURE, "transaction not submitted");
        })?;
        info!(target: "polypay::contracts", %hash, function = C::SIGNATURE, "transaction submitted");
        Ok(TransactionHandle::submitted(hash, tx))
    }
}

fn request<C: SolCall>(to: Address, call: &C) -> TransactionRequest {
    TransactionRequest {
        to: Some(TxKind::Call(to)),
        input: TransactionInput::both(call.abi_encode().into()),
        ..Default::default()
    }
}
