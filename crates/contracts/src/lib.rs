//! # polypay-contracts
//!
//! Typed calls to the shop's token, token sale and DAO contracts.
//!
//! [`ContractGateway`] encodes calls generated from Solidity signatures (see [`abi`]), routes
//! reads through `eth_call` and writes through the wallet, and returns a [`TransactionHandle`]
//! for every submitted transaction. [`TransactionTracker`] turns handles into
//! [`ConfirmedTransaction`]s.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod abi;

mod error;
pub use error::{GatewayError, RevertReason, TrackerError};

mod gateway;
pub use gateway::ContractGateway;

mod handle;
pub use handle::{ConfirmedTransaction, TransactionHandle, TxStatus};

mod ops;
pub use ops::{ProposalSubmission, TokenBalance};

mod tracker;
pub use tracker::TransactionTracker;

pub mod units;
pub use units::{Amount, AmountError};
