use alloy_primitives::Address;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the session event channel; slow observers miss the oldest events.
const EVENT_CAPACITY: usize = 32;

/// Connection state between polypay and the wallet.
///
/// A connected session always has an account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<Address>,
    active_chain_id: Option<u64>,
    connected: bool,
}

impl WalletSession {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(account: Address, chain_id: Option<u64>) -> Self {
        Self { account: Some(account), active_chain_id: chain_id, connected: true }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn active_chain_id(&self) -> Option<u64> {
        self.active_chain_id
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether the session is connected and known to be on `chain_id`.
    pub fn is_ready_for(&self, chain_id: u64) -> bool {
        self.connected && self.active_chain_id == Some(chain_id)
    }
}

/// Why a session was reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The user asked to disconnect.
    Requested,
    /// The wallet no longer exposes any account.
    AccountsRevoked,
    /// The user selected a different account in the wallet.
    AccountChanged(Address),
}

/// Session changes published to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Connected { account: Address, chain_id: Option<u64> },
    ChainChanged { chain_id: u64 },
    Disconnected(DisconnectReason),
}

/// Shared handle to a [`WalletSession`].
///
/// Everyone can read the session and subscribe to its events, only the
/// [`SessionManager`](crate::SessionManager) writes to it. Cloning the handle shares the
/// underlying session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    session: Arc<RwLock<WalletSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { session: Arc::new(RwLock::new(WalletSession::default())), events }
    }

    /// A copy of the current session state.
    pub fn snapshot(&self) -> WalletSession {
        self.session.read().clone()
    }

    pub fn account(&self) -> Option<Address> {
        self.session.read().account
    }

    pub fn is_connected(&self) -> bool {
        self.session.read().connected
    }

    /// Registers an observer for session changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn set_connected(&self, account: Address, chain_id: Option<u64>) {
        *self.session.write() = WalletSession::connected(account, chain_id);
        self.publish(SessionEvent::Connected { account, chain_id });
    }

    /// Records the active chain. Observers only hear about it once the session is connected.
    pub(crate) fn set_chain(&self, chain_id: u64) {
        let changed = {
            let mut session = self.session.write();
            let changed = session.connected && session.active_chain_id != Some(chain_id);
            session.active_chain_id = Some(chain_id);
            changed
        };
        if changed {
            self.publish(SessionEvent::ChainChanged { chain_id });
        }
    }

    pub(crate) fn reset(&self, reason: DisconnectReason) {
        let was_connected = {
            let mut session = self.session.write();
            std::mem::take(&mut *session).connected
        };
        if was_connected {
            self.publish(SessionEvent::Disconnected(reason));
        }
    }

    fn publish(&self, event: SessionEvent) {
        // No receivers is fine, nobody is watching.
        let _ = self.events.send(event);
    }
}
