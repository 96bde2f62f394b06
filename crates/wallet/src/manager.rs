use crate::{
    DisconnectReason, SessionEvent, SessionHandle, WalletError, WalletProvider,
};
use alloy_primitives::Address;
use polypay_networks::NetworkProfile;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Owns the connection lifecycle with the wallet provider.
///
/// The provider is optional: a front-end without a wallet still constructs a manager, every
/// operation that needs the wallet then fails with [`WalletError::ProviderUnavailable`].
#[derive(Clone, Debug)]
pub struct SessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    session: SessionHandle,
    target: NetworkProfile,
}

impl SessionManager {
    /// Creates a manager with a fresh session that keeps the wallet on `target`.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, target: NetworkProfile) -> Self {
        Self { provider, session: SessionHandle::new(), target }
    }

    /// Uses an existing session instead of a fresh one.
    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn target(&self) -> &NetworkProfile {
        &self.target
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The wallet provider, if one is present.
    pub fn provider(&self) -> Result<&Arc<dyn WalletProvider>, WalletError> {
        self.provider.as_ref().ok_or(WalletError::ProviderUnavailable)
    }

    /// Registers an observer for session changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    /// Requests account access and moves the wallet to the target network.
    ///
    /// The session only becomes connected once both steps succeeded; a wallet on the wrong
    /// network is not usable.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        let provider = self.provider()?;
        let accounts = provider.request_accounts().await?;
        let account = accounts.first().copied().ok_or(WalletError::NoAccounts)?;
        debug!(target: "polypay::wallet", %account, "account access granted");

        self.verify_network(&self.target).await?;

        self.session.set_connected(account, Some(self.target.chain_id));
        info!(target: "polypay::wallet", %account, network = %self.target, "wallet connected");
        Ok(account)
    }

    /// Makes sure the wallet is on `target`.
    ///
    /// Wallets do not register unknown networks on their own: if the switch fails because the
    /// chain is unrecognized, the chain is added and the switch retried once. Any other failure
    /// is returned as is.
    pub async fn verify_network(&self, target: &NetworkProfile) -> Result<(), WalletError> {
        let provider = self.provider()?;
        let chain_id = target.chain_id;

        match provider.switch_chain(chain_id).await {
            Ok(()) => {}
            Err(err) if err.is_unrecognized_chain() => {
                debug!(target: "polypay::wallet", network = %target, "chain unknown to wallet, adding it");
                provider.add_chain(target).await?;
                provider.switch_chain(chain_id).await.map_err(|err| {
                    if err.is_unrecognized_chain() {
                        WalletError::UnrecognizedChain(target.chain_id_hex())
                    } else {
                        err.into()
                    }
                })?;
            }
            Err(err) => return Err(err.into()),
        }

        self.session.set_chain(chain_id);
        debug!(target: "polypay::wallet", network = %target, "wallet on target network");
        Ok(())
    }

    /// The connected account, restoring a previously authorized session without prompting.
    ///
    /// Returns `None` if there is no wallet or the user never granted access.
    pub async fn get_active_account(&self) -> Result<Option<Address>, WalletError> {
        if let Some(account) = self.session.snapshot().account() {
            return Ok(Some(account));
        }
        let Some(provider) = &self.provider else { return Ok(None) };

        let Some(account) = provider.authorized_accounts().await?.first().copied() else {
            return Ok(None);
        };
        let chain_id = provider.chain_id().await?;
        self.session.set_connected(account, Some(chain_id));
        info!(target: "polypay::wallet", %account, chain_id, "restored wallet session");
        Ok(Some(account))
    }

    /// Returns the session account, connecting and switching networks as needed.
    pub async fn ensure_ready(&self) -> Result<Address, WalletError> {
        let session = self.session.snapshot();
        match session.account() {
            Some(account) if session.is_ready_for(self.target.chain_id) => Ok(account),
            Some(account) => {
                self.verify_network(&self.target).await?;
                Ok(account)
            }
            None => self.connect().await,
        }
    }

    /// Forgets the connected account.
    pub fn disconnect(&self) {
        self.session.reset(DisconnectReason::Requested);
        info!(target: "polypay::wallet", "wallet disconnected");
    }

    /// Feeds an `accountsChanged` notification from the wallet.
    ///
    /// Any change of the selected account invalidates the session; the user has to connect
    /// again.
    pub fn handle_accounts_changed(&self, accounts: &[Address]) {
        let current = self.session.account();
        match accounts.first().copied() {
            None => self.session.reset(DisconnectReason::AccountsRevoked),
            Some(account) if current.is_some_and(|current| current != account) => {
                self.session.reset(DisconnectReason::AccountChanged(account));
            }
            Some(_) => {}
        }
    }

    /// Feeds a `chainChanged` notification from the wallet.
    pub fn handle_chain_changed(&self, chain_id: u64) {
        if chain_id != self.target.chain_id {
            warn!(target: "polypay::wallet", chain_id, expected = self.target.chain_id, "wallet left the target network");
        }
        self.session.set_chain(chain_id);
    }
}
