//! The contract interactions offered to users.

use crate::{
    Amount, AmountError, ContractGateway, GatewayError, TransactionHandle,
    abi::{IDao, IERC20, ITokenSale},
    units::{format_base_units, purchase_cost},
};
use alloy_primitives::{Address, U256};

/// A token balance together with the scale it was read with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenBalance {
    pub raw: U256,
    pub decimals: u8,
    pub formatted: String,
}

/// A submitted proposal and the id the DAO is expected to assign to it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalSubmission {
    pub handle: TransactionHandle,
    /// Result of running the proposal as a call right before submitting it. Concurrent
    /// proposals can shift the id that ends up on chain.
    pub expected_proposal_id: U256,
}

impl ContractGateway {
    /// Reads the token's decimals.
    pub async fn token_decimals(&self, token: Address) -> Result<u8, GatewayError> {
        self.read_call(token, &IERC20::decimalsCall {}).await
    }

    /// Reads the balance of `owner` in `token`.
    pub async fn token_balance(&self, token: Address, owner: Address) -> Result<TokenBalance, GatewayError> {
        let decimals = self.token_decimals(token).await?;
        let raw = self.read_call(token, &IERC20::balanceOfCall { owner }).await?;
        Ok(TokenBalance { raw, decimals, formatted: format_base_units(raw, decimals)? })
    }

    /// Buys `amount` tokens from the sale contract, paying `price_per_token` wei per whole token.
    pub async fn purchase_tokens(
        &self,
        token: Address,
        sale: Address,
        amount: &Amount,
        price_per_token: U256,
    ) -> Result<TransactionHandle, GatewayError> {
        ensure_positive(amount)?;
        let decimals = self.token_decimals(token).await?;
        let amount = amount.to_base_units(decimals)?;
        let value = purchase_cost(price_per_token, amount, decimals)?;
        self.write_call(sale, &ITokenSale::buyTokensCall { amount }, Some(value)).await
    }

    /// Transfers `amount` tokens to `recipient`.
    pub async fn pay_with_tokens(
        &self,
        token: Address,
        recipient: Address,
        amount: &Amount,
    ) -> Result<TransactionHandle, GatewayError> {
        ensure_positive(amount)?;
        let decimals = self.token_decimals(token).await?;
        let amount = amount.to_base_units(decimals)?;
        self.write_call(token, &IERC20::transferCall { to: recipient, amount }, None).await
    }

    /// Votes on a DAO proposal.
    pub async fn vote(
        &self,
        dao: Address,
        proposal_id: U256,
        support: bool,
    ) -> Result<TransactionHandle, GatewayError> {
        self.write_call(dao, &IDao::voteCall { proposalId: proposal_id, support }, None).await
    }

    /// Creates a DAO proposal.
    ///
    /// The proposal is run as a call first; a proposal that would revert is never submitted.
    pub async fn propose(&self, dao: Address, description: &str) -> Result<ProposalSubmission, GatewayError> {
        let call = IDao::proposeCall { description: description.to_string() };
        let expected_proposal_id = self.read_call(dao, &call).await?;
        let handle = self.write_call(dao, &call, None).await?;
        Ok(ProposalSubmission { handle, expected_proposal_id })
    }
}

fn ensure_positive(amount: &Amount) -> Result<(), AmountError> {
    if amount.is_zero() { Err(AmountError::Zero) } else { Ok(()) }
}
