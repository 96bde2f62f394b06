//! # polypay-bridge
//!
//! The layer between a front-end and the rest of polypay. A front-end hands [`UserAction`]s to
//! [`UiBridge::dispatch`] and displays the returned [`Notice`]; session changes reported by the
//! wallet go through [`UiBridge::on_session_event`].
//!
//! Notices tell apart failures where nothing happened from the ones where funds moved but the
//! shop backend was not informed, see [`RetryHint`].

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod action;
pub use action::UserAction;

mod bridge;
pub use bridge::{ShopContracts, UiBridge};

mod error;
pub use error::ActionError;

mod notice;
pub use notice::{Notice, NoticeLevel, RetryHint};
