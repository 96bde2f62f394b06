//! # polypay-cli
//!
//! Building blocks of the `polypay` binary.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod cmd;
pub mod handler;
pub mod opts;
pub mod utils;

use tokio as _;
