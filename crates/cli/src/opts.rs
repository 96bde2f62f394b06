//! Command line arguments.

use alloy_primitives::U256;
use clap::{Parser, Subcommand};
use figment::{
    Metadata, Profile, Provider,
    providers::Serialized,
    value::{Dict, Map},
};
use polypay_bridge::UserAction;
use polypay_contracts::Amount;
use polypay_networks::parse_chain_id;
use serde::Serialize;
use std::path::PathBuf;

/// Pay shop orders, buy tokens and take part in the shop DAO with your wallet.
#[derive(Debug, Parser)]
#[command(name = "polypay", version, next_display_order = None)]
pub struct Polypay {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub cmd: PolypaySubcommand,
}

/// Options shared by all subcommands. Set options override the configuration file and the
/// environment.
#[derive(Clone, Debug, Default, Parser, Serialize)]
pub struct GlobalOpts {
    /// Path to the configuration file.
    #[arg(long, short, global = true, value_name = "PATH", env = "POLYPAY_CONFIG")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint of the wallet.
    #[arg(long, global = true, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_url: Option<String>,

    /// Base URL of the shop backend.
    #[arg(long, global = true, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// Chain to keep the wallet on, as hex or decimal id.
    #[arg(long = "chain", global = true, value_name = "CHAIN_ID", value_parser = parse_chain_id)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Print notices as JSON.
    #[arg(long, global = true)]
    #[serde(skip)]
    pub json: bool,
}

impl Provider for GlobalOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("command line arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum PolypaySubcommand {
    /// Connect the wallet and move it to the target network.
    Connect,

    /// Show the connected account without prompting the wallet.
    Status,

    /// Show the token balance of the connected account.
    #[command(visible_alias = "b")]
    Balance,

    /// Buy tokens from the token sale.
    Buy {
        /// Amount of tokens, e.g. `12.5`.
        amount: Amount,

        /// Purchase to confirm with the shop once mined.
        #[arg(long)]
        purchase_id: Option<u64>,
    },

    /// Pay a shop order in tokens.
    Pay {
        /// The order to pay.
        order_id: u64,

        /// Amount of tokens.
        amount: Amount,
    },

    /// Vote on a DAO proposal.
    Vote {
        /// The proposal to vote on.
        proposal_id: U256,

        /// Vote against the proposal instead of for it.
        #[arg(long)]
        against: bool,

        /// Vote to confirm with the shop once mined.
        #[arg(long)]
        vote_id: Option<u64>,
    },

    /// Create a DAO proposal.
    Propose {
        /// What the proposal is about.
        description: String,
    },

    /// List the networks polypay knows about.
    Networks,
}

impl PolypaySubcommand {
    /// The bridge action of this command, if it is one.
    pub fn into_action(self) -> Option<UserAction> {
        Some(match self {
            Self::Connect => UserAction::Connect,
            Self::Status => UserAction::Restore,
            Self::Balance => UserAction::ShowBalance,
            Self::Buy { amount, purchase_id } => UserAction::Buy { amount, purchase_id },
            Self::Pay { order_id, amount } => UserAction::PayOrder { order_id, amount },
            Self::Vote { proposal_id, against, vote_id } => {
                UserAction::Vote { proposal_id, support: !against, vote_id }
            }
            Self::Propose { description } => UserAction::Propose { description },
            Self::Networks => return None,
        })
    }
}
