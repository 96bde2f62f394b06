use alloy_primitives::U256;
use polypay_contracts::Amount;

/// Something the user asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// Connect the wallet, prompting for access.
    Connect,
    /// Pick up a previously authorized wallet without prompting, e.g. on page load.
    Restore,
    /// Show the token balance of the connected account.
    ShowBalance,
    /// Buy tokens from the sale contract. The backend is told about the purchase when it
    /// tracks it under `purchase_id`.
    Buy { amount: Amount, purchase_id: Option<u64> },
    /// Pay a shop order in tokens.
    PayOrder { order_id: u64, amount: Amount },
    /// Vote on a DAO proposal. The backend is told about the vote when it tracks it under
    /// `vote_id`.
    Vote { proposal_id: U256, support: bool, vote_id: Option<u64> },
    /// Create a DAO proposal.
    Propose { description: String },
    Disconnect,
}

impl UserAction {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Restore => "restore",
            Self::ShowBalance => "balance",
            Self::Buy { .. } => "buy",
            Self::PayOrder { .. } => "pay",
            Self::Vote { .. } => "vote",
            Self::Propose { .. } => "propose",
            Self::Disconnect => "disconnect",
        }
    }
}
