use crate::{ActionError, Notice, NoticeLevel, RetryHint, UserAction};
use alloy_primitives::{Address, U256};
use polypay_contracts::{
    Amount, ConfirmedTransaction, ContractGateway, TransactionHandle, TransactionTracker,
};
use polypay_orders::{
    OrderPaymentRecord, OrderReconciler, ReconciliationError, TransferConfirmation,
};
use polypay_wallet::{DisconnectReason, SessionEvent, SessionManager, short_address};
use tokio::sync::Mutex;

/// Contract addresses and prices the shop runs with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShopContracts {
    pub token: Option<Address>,
    pub sale: Option<Address>,
    pub dao: Option<Address>,
    /// Account receiving order payments.
    pub receiver: Option<Address>,
    /// Wei per whole token.
    pub token_price: U256,
}

impl ShopContracts {
    fn require(address: Option<Address>, name: &'static str) -> Result<Address, ActionError> {
        address.ok_or(ActionError::NotConfigured(name))
    }
}

/// Runs [`UserAction`]s one at a time and renders their outcome as [`Notice`]s.
///
/// Steps of an action run strictly in sequence and stop at the first failure. Dispatching while
/// another action is running is refused with [`Notice::busy`].
#[derive(Debug)]
pub struct UiBridge {
    manager: SessionManager,
    orders: OrderReconciler,
    contracts: ShopContracts,
    in_flight: Mutex<()>,
}

impl UiBridge {
    pub fn new(manager: SessionManager, orders: OrderReconciler, contracts: ShopContracts) -> Self {
        Self { manager, orders, contracts, in_flight: Mutex::new(()) }
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Shortened address of the connected account, e.g. `0xf39F…2266`.
    pub fn account_label(&self) -> Option<String> {
        self.manager.session().account().map(|account| short_address(&account))
    }

    /// Runs `action` unless another one is in flight.
    pub async fn dispatch(&self, action: UserAction) -> Notice {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!(target: "polypay::bridge", action = action.name(), "refused, busy");
            return Notice::busy();
        };

        let name = action.name();
        debug!(target: "polypay::bridge", action = name, "dispatching");
        match self.run(action).await {
            Ok(notice) => notice,
            Err(err) => {
                warn!(target: "polypay::bridge", action = name, %err, "action failed");
                err.notice(|hash| self.manager.target().explorer_tx_url(hash))
            }
        }
    }

    /// Renders a session change reported by the wallet, if the user should know about it.
    pub fn on_session_event(&self, event: &SessionEvent) -> Option<Notice> {
        match event {
            SessionEvent::Connected { .. } | SessionEvent::Disconnected(DisconnectReason::Requested) => None,
            SessionEvent::ChainChanged { chain_id } if *chain_id != self.manager.target().chain_id => {
                Some(Notice::warning(
                    format!("The wallet left {}, switch back before continuing", self.manager.target().name),
                    RetryHint::SafeToRetry,
                ))
            }
            SessionEvent::ChainChanged { .. } => None,
            SessionEvent::Disconnected(DisconnectReason::AccountsRevoked) => {
                Some(Notice::info("Wallet disconnected"))
            }
            SessionEvent::Disconnected(DisconnectReason::AccountChanged(account)) => Some(Notice::info(
                format!("Account changed to {}, connect again to continue", short_address(account)),
            )),
        }
    }

    async fn run(&self, action: UserAction) -> Result<Notice, ActionError> {
        match action {
            UserAction::Connect => {
                let account = self.manager.connect().await?;
                Ok(Notice::success(format!("Connected {}", short_address(&account))))
            }
            UserAction::Restore => self.restore().await,
            UserAction::ShowBalance => {
                let token = ShopContracts::require(self.contracts.token, "token_address")?;
                let account = self.manager.ensure_ready().await?;
                let balance = self.gateway()?.token_balance(token, account).await?;
                Ok(Notice::info(format!("Balance: {} tokens", balance.formatted)))
            }
            UserAction::Buy { amount, purchase_id } => self.buy(&amount, purchase_id).await,
            UserAction::PayOrder { order_id, amount } => self.pay(order_id, &amount).await,
            UserAction::Vote { proposal_id, support, vote_id } => {
                let dao = ShopContracts::require(self.contracts.dao, "dao_address")?;
                self.manager.ensure_ready().await?;
                let handle = self.gateway()?.vote(dao, proposal_id, support).await?;
                let confirmed = self.confirm(handle).await?;
                if let Some(vote_id) = vote_id {
                    let confirmation = TransferConfirmation::vote(vote_id, &confirmed);
                    self.record(&confirmed, self.orders.confirm_transfer(&confirmation)).await?;
                }
                Ok(self.confirmed_notice("Vote recorded", &confirmed))
            }
            UserAction::Propose { description } => {
                let dao = ShopContracts::require(self.contracts.dao, "dao_address")?;
                self.manager.ensure_ready().await?;
                let submission = self.gateway()?.propose(dao, &description).await?;
                let confirmed = self.confirm(submission.handle).await?;
                Ok(self.confirmed_notice(
                    format!("Proposal #{} created", submission.expected_proposal_id),
                    &confirmed,
                ))
            }
            UserAction::Disconnect => {
                self.manager.disconnect();
                Ok(Notice::info("Wallet disconnected"))
            }
        }
    }

    async fn restore(&self) -> Result<Notice, ActionError> {
        if !self.manager.has_provider() {
            return Ok(Notice::new(
                NoticeLevel::Info,
                "Install MetaMask or another browser wallet to pay with tokens",
                RetryHint::InstallWallet,
            ));
        }
        Ok(match self.manager.get_active_account().await? {
            Some(account) => Notice::info(format!("Connected {}", short_address(&account))),
            None => Notice::info("Connect your wallet to continue"),
        })
    }

    async fn buy(&self, amount: &Amount, purchase_id: Option<u64>) -> Result<Notice, ActionError> {
        let token = ShopContracts::require(self.contracts.token, "token_address")?;
        let sale = ShopContracts::require(self.contracts.sale, "sale_address")?;
        self.manager.ensure_ready().await?;

        let handle =
            self.gateway()?.purchase_tokens(token, sale, amount, self.contracts.token_price).await?;
        let confirmed = self.confirm(handle).await?;
        if let Some(purchase_id) = purchase_id {
            let confirmation = TransferConfirmation::purchase(purchase_id, &confirmed);
            self.record(&confirmed, self.orders.confirm_transfer(&confirmation)).await?;
        }
        Ok(self.confirmed_notice(format!("Bought {amount} tokens"), &confirmed))
    }

    async fn pay(&self, order_id: u64, amount: &Amount) -> Result<Notice, ActionError> {
        let token = ShopContracts::require(self.contracts.token, "token_address")?;
        let receiver = ShopContracts::require(self.contracts.receiver, "shop_receiver")?;
        self.manager.ensure_ready().await?;

        let handle = self.gateway()?.pay_with_tokens(token, receiver, amount).await?;
        let confirmed = self.confirm(handle).await?;
        let record = OrderPaymentRecord::new(order_id, &confirmed);
        self.record(&confirmed, self.orders.report_payment(&record)).await?;
        Ok(self.confirmed_notice(format!("Order #{order_id} paid"), &confirmed))
    }

    fn gateway(&self) -> Result<ContractGateway, ActionError> {
        Ok(ContractGateway::from_manager(&self.manager)?)
    }

    async fn confirm(&self, handle: TransactionHandle) -> Result<ConfirmedTransaction, ActionError> {
        let tracker = TransactionTracker::new(self.manager.provider()?.clone());
        Ok(tracker.wait(handle).await?)
    }

    /// Awaits a backend report, tagging a failure with the already confirmed transaction.
    async fn record<T>(
        &self,
        confirmed: &ConfirmedTransaction,
        report: impl Future<Output = Result<T, ReconciliationError>>,
    ) -> Result<T, ActionError> {
        report.await.map_err(|source| ActionError::Reconciliation { tx_hash: confirmed.hash(), source })
    }

    fn confirmed_notice(&self, message: impl Into<String>, confirmed: &ConfirmedTransaction) -> Notice {
        let hash = confirmed.hash();
        Notice::success(message).with_tx(hash, self.manager.target().explorer_tx_url(hash))
    }
}
