//! # polypay-test-utils
//!
//! Fakes for the collaborators polypay talks to: a scriptable [`MockWallet`] standing in for the
//! browser wallet and a [`MockBackend`] HTTP server standing in for the order system.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod backend;
pub use backend::{MockBackend, RecordedRequest};

mod wallet;
pub use wallet::{MinedOutcome, MockWallet};

use alloy_primitives::{Address, address};
use polypay_networks::NetworkProfile;
use polypay_wallet::{SessionManager, WalletProvider};
use std::sync::Arc;

/// First default anvil account.
pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
/// Second default anvil account.
pub const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Initializes tracing for tests, honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session manager on Polygon mainnet driving `wallet`.
pub fn manager_for(wallet: &Arc<MockWallet>) -> SessionManager {
    let provider: Arc<dyn WalletProvider> = wallet.clone();
    SessionManager::new(Some(provider), NetworkProfile::polygon_mainnet())
}
