use alloy_primitives::{Address, B256, Bytes, TxHash};
use alloy_rpc_types_eth::TransactionRequest;
use async_trait::async_trait;
use parking_lot::Mutex;
use polypay_networks::NetworkProfile;
use polypay_wallet::{BlockTag, ProviderError, RpcError, TxReceipt, WalletProvider};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// What a mined transaction ends up as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MinedOutcome {
    #[default]
    Success,
    Reverted,
    Dropped,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Address>,
    authorized: bool,
    chain_id: u64,
    known_chains: BTreeSet<u64>,
    failures: HashMap<&'static str, VecDeque<RpcError>>,
    calls: HashMap<(Address, [u8; 4]), Result<Bytes, RpcError>>,
    outcome: MinedOutcome,
    block: u64,
    requests: Vec<&'static str>,
    sent: Vec<TransactionRequest>,
    call_blocks: Vec<BlockTag>,
}

/// Scriptable in-memory [`WalletProvider`].
///
/// Behaves like a browser wallet: switching to an unknown chain fails with code 4902 until the
/// chain is added, account access grants all accounts, every submitted transaction gets mined in
/// the next block. Every request is recorded by method name.
#[derive(Debug, Default)]
pub struct MockWallet {
    state: Mutex<State>,
}

impl MockWallet {
    /// A wallet holding `accounts`, currently on `chain_id`, knowing only that chain.
    pub fn new(accounts: impl IntoIterator<Item = Address>, chain_id: u64) -> Self {
        let state = State {
            accounts: accounts.into_iter().collect(),
            chain_id,
            known_chains: BTreeSet::from([chain_id]),
            block: 100,
            ..Default::default()
        };
        Self { state: Mutex::new(state) }
    }

    /// Marks `chain_id` as already registered in the wallet.
    pub fn with_known_chain(self, chain_id: u64) -> Self {
        self.state.lock().known_chains.insert(chain_id);
        self
    }

    /// Pretends the user authorized the site earlier.
    pub fn authorized(self) -> Self {
        self.state.lock().authorized = true;
        self
    }

    /// Answers `eth_call`s to `to` whose calldata starts with `selector`.
    pub fn on_call(&self, to: Address, selector: [u8; 4], response: impl Into<Bytes>) {
        self.state.lock().calls.insert((to, selector), Ok(response.into()));
    }

    /// Makes `eth_call`s to `to` with `selector` fail with `error`.
    pub fn on_call_error(&self, to: Address, selector: [u8; 4], error: RpcError) {
        self.state.lock().calls.insert((to, selector), Err(error));
    }

    /// Makes the next request for `method` fail with `error`.
    pub fn fail_next(&self, method: &'static str, error: RpcError) {
        self.state.lock().failures.entry(method).or_default().push_back(error);
    }

    /// Sets how transactions submitted from now on end up.
    pub fn mine_as(&self, outcome: MinedOutcome) {
        self.state.lock().outcome = outcome;
    }

    /// Method names of all requests so far, in order.
    pub fn requests(&self) -> Vec<&'static str> {
        self.state.lock().requests.clone()
    }

    /// Number of requests made for `method`.
    pub fn count(&self, method: &str) -> usize {
        self.state.lock().requests.iter().filter(|m| **m == method).count()
    }

    /// Transactions submitted through `eth_sendTransaction`.
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.state.lock().sent.clone()
    }

    /// Block selectors of all `eth_call`s.
    pub fn call_blocks(&self) -> Vec<BlockTag> {
        self.state.lock().call_blocks.clone()
    }

    pub fn current_chain(&self) -> u64 {
        self.state.lock().chain_id
    }

    pub fn knows_chain(&self, chain_id: u64) -> bool {
        self.state.lock().known_chains.contains(&chain_id)
    }

    fn record(&self, method: &'static str) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        state.requests.push(method);
        match state.failures.get_mut(method).and_then(VecDeque::pop_front) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn hash_for(index: usize) -> TxHash {
        B256::left_padding_from(&(index as u64 + 1).to_be_bytes())
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record("eth_requestAccounts")?;
        let mut state = self.state.lock();
        state.authorized = true;
        Ok(state.accounts.clone())
    }

    async fn authorized_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record("eth_accounts")?;
        let state = self.state.lock();
        Ok(if state.authorized { state.accounts.clone() } else { Vec::new() })
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        self.record("eth_chainId")?;
        Ok(self.state.lock().chain_id)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        self.record("wallet_switchEthereumChain")?;
        let mut state = self.state.lock();
        if !state.known_chains.contains(&chain_id) {
            return Err(RpcError::unrecognized_chain(&format!("{chain_id:#x}")).into());
        }
        state.chain_id = chain_id;
        Ok(())
    }

    async fn add_chain(&self, profile: &NetworkProfile) -> Result<(), ProviderError> {
        self.record("wallet_addEthereumChain")?;
        self.state.lock().known_chains.insert(profile.chain_id);
        Ok(())
    }

    async fn call(&self, tx: &TransactionRequest, block: BlockTag) -> Result<Bytes, ProviderError> {
        self.record("eth_call")?;
        let mut state = self.state.lock();
        state.call_blocks.push(block);
        let to = tx.to.and_then(|kind| kind.to().copied()).unwrap_or_default();
        let input = tx.input.input().cloned().unwrap_or_default();
        let selector: [u8; 4] = input.get(..4).and_then(|s| s.try_into().ok()).unwrap_or_default();
        match state.calls.get(&(to, selector)) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(err)) => Err(err.clone().into()),
            None => Ok(Bytes::new()),
        }
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        self.record("eth_sendTransaction")?;
        let mut state = self.state.lock();
        state.sent.push(tx.clone());
        Ok(Self::hash_for(state.sent.len() - 1))
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxReceipt, ProviderError> {
        self.record("eth_getTransactionReceipt")?;
        let mut state = self.state.lock();
        state.block += 1;
        match state.outcome {
            MinedOutcome::Success => Ok(TxReceipt::success(hash, state.block)),
            MinedOutcome::Reverted => Ok(TxReceipt::reverted(hash, state.block)),
            MinedOutcome::Dropped => Err(ProviderError::Dropped(hash)),
        }
    }
}
