//! # polypay-orders
//!
//! Tells the shop backend about confirmed on-chain transfers.
//!
//! Records can only be built from a [`ConfirmedTransaction`], and every transaction is reported
//! at most once per endpoint. Nothing is retried: a failed report leaves the on-chain transfer
//! in place and the caller has to surface it.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod client;
pub use client::{Ack, OrderReconciler, PAYMENT_PATH, TRANSFER_CONFIRM_PATH};

mod error;
pub use error::ReconciliationError;

mod record;
pub use record::{OrderPaymentRecord, TransferConfirmation, TransferKind};

use polypay_contracts::ConfirmedTransaction;
