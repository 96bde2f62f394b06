//! # polypay-networks
//!
//! Static descriptors of the networks a wallet can be asked to switch to.
//!
//! A [`NetworkProfile`] serializes to exactly the parameter object of
//! [EIP-3085](https://eips.ethereum.org/EIPS/eip-3085) `wallet_addEthereumChain`, so the same value
//! is used for lookups and for registering the network with a wallet that does not know it yet.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod chain_id;
pub use chain_id::{ChainIdError, format_chain_id, parse_chain_id};

mod profile;
pub use profile::{NativeCurrency, NetworkProfile, POLYGON_MAINNET_CHAIN_ID, POLYGON_MUMBAI_CHAIN_ID};

mod registry;
pub use registry::{NetworkRegistry, RegistryError};

pub use alloy_chains::NamedChain;
