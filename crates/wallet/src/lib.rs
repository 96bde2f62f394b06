//! # polypay-wallet
//!
//! Connection to a user controlled wallet.
//!
//! The wallet is consumed through the [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193)
//! request surface: [`WalletProvider`] is the typed view of it, [`Eip1193Provider`] implements it
//! on top of any [`Transport`] and [`HttpTransport`] carries requests as JSON-RPC over HTTP.
//!
//! [`SessionManager`] owns the connection lifecycle and is the only writer of the
//! [`SessionHandle`] everyone else reads from.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod error;
pub use error::{ErrorCode, ProviderError, RpcError, WalletError};

mod manager;
pub use manager::SessionManager;

mod provider;
pub use provider::{DEFAULT_RECEIPT_POLL_INTERVAL, Eip1193Provider, Transport, WalletProvider};

pub mod request;
pub use request::{BlockTag, EthereumRequest};

mod session;
pub use session::{DisconnectReason, SessionEvent, SessionHandle, WalletSession};

mod transport;
pub use transport::HttpTransport;

mod types;
pub use types::TxReceipt;

/// Shortens an address for display: `0xf39F…2266`.
pub fn short_address(address: &alloy_primitives::Address) -> String {
    let full = address.to_checksum(None);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}
