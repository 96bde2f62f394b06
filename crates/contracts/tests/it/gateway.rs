use crate::{DAO, SALE, TOKEN, connected};
use alloy_primitives::{U256, address};
use alloy_sol_types::{Revert, SolCall, SolError, SolValue};
use polypay_contracts::{
    Amount, AmountError, ContractGateway, GatewayError, TxStatus,
    abi::{IDao, IERC20, ITokenSale},
};
use polypay_networks::POLYGON_MAINNET_CHAIN_ID;
use polypay_test_utils::{ALICE, BOB, MockWallet, manager_for};
use polypay_wallet::{ErrorCode, RpcError};
use similar_asserts::assert_eq;
use std::sync::Arc;

fn six_decimals(wallet: &MockWallet) {
    wallet.on_call(TOKEN, IERC20::decimalsCall::SELECTOR, U256::from(6).abi_encode());
}

#[tokio::test]
async fn reads_formatted_balance() {
    let (wallet, gateway) = connected().await;
    six_decimals(&wallet);
    wallet.on_call(TOKEN, IERC20::balanceOfCall::SELECTOR, U256::from(12_500_000u64).abi_encode());

    let balance = gateway.token_balance(TOKEN, ALICE).await.unwrap();
    assert_eq!(balance.decimals, 6);
    assert_eq!(balance.raw, U256::from(12_500_000u64));
    assert_eq!(balance.formatted, "12.5");
    assert_eq!(wallet.count("eth_call"), 2);
}

#[tokio::test]
async fn reads_work_without_connection() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    six_decimals(&wallet);
    let gateway = ContractGateway::from_manager(&manager_for(&wallet)).unwrap();
    assert_eq!(gateway.token_decimals(TOKEN).await.unwrap(), 6);
}

#[tokio::test]
async fn writes_require_connection() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let gateway = ContractGateway::from_manager(&manager_for(&wallet)).unwrap();

    let err = gateway.vote(DAO, U256::from(1), true).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotConnected));
    assert_eq!(wallet.count("eth_sendTransaction"), 0);
}

#[tokio::test]
async fn pays_in_token_base_units() {
    let (wallet, gateway) = connected().await;
    six_decimals(&wallet);
    let shop = address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

    let amount: Amount = "10".parse().unwrap();
    let handle = gateway.pay_with_tokens(TOKEN, shop, &amount).await.unwrap();
    assert_eq!(handle.status(), TxStatus::Submitted);
    assert_eq!(handle.receipt_hash(), None);

    let requests = wallet.requests();
    let send = requests.iter().position(|m| *m == "eth_sendTransaction").unwrap();
    assert!(requests[..send].contains(&"eth_call"), "decimals are read before the transfer");

    let sent = wallet.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, Some(ALICE));
    assert_eq!(sent[0].value, None);
    let call = IERC20::transferCall::abi_decode(sent[0].input.input().unwrap()).unwrap();
    assert_eq!(call.to, shop);
    assert_eq!(call.amount, U256::from(10_000_000u64));
}

#[tokio::test]
async fn purchase_attaches_price() {
    let (wallet, gateway) = connected().await;
    wallet.on_call(TOKEN, IERC20::decimalsCall::SELECTOR, U256::from(18).abi_encode());
    let price = U256::from(10u64).pow(U256::from(16));

    let amount: Amount = "3".parse().unwrap();
    gateway.purchase_tokens(TOKEN, SALE, &amount, price).await.unwrap();

    let sent = wallet.sent();
    let tokens = U256::from(3u64) * U256::from(10u64).pow(U256::from(18));
    assert_eq!(sent[0].value, Some(U256::from(3u64) * price));
    let call = ITokenSale::buyTokensCall::abi_decode(sent[0].input.input().unwrap()).unwrap();
    assert_eq!(call.amount, tokens);
}

#[tokio::test]
async fn zero_amount_never_reaches_wallet() {
    let (wallet, gateway) = connected().await;
    let before = wallet.requests().len();

    let amount: Amount = "0.0".parse().unwrap();
    let err = gateway.pay_with_tokens(TOKEN, BOB, &amount).await.unwrap_err();
    assert!(matches!(err, GatewayError::Amount(AmountError::Zero)));
    assert_eq!(wallet.requests().len(), before);
}

#[tokio::test]
async fn maps_submission_failures() {
    let (wallet, gateway) = connected().await;

    wallet.fail_next("eth_sendTransaction", RpcError::user_rejected());
    let err = gateway.vote(DAO, U256::from(1), false).await.unwrap_err();
    assert!(matches!(err, GatewayError::UserRejected));

    wallet.fail_next(
        "eth_sendTransaction",
        RpcError::with_message(ErrorCode::InvalidInput, "insufficient funds for gas * price + value"),
    );
    let err = gateway.vote(DAO, U256::from(1), false).await.unwrap_err();
    assert!(matches!(err, GatewayError::InsufficientFunds));

    wallet.fail_next("eth_sendTransaction", RpcError::new(ErrorCode::Disconnected));
    let err = gateway.vote(DAO, U256::from(1), false).await.unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));

    assert!(wallet.sent().is_empty());
}

#[tokio::test]
async fn vote_encodes_arguments() {
    let (wallet, gateway) = connected().await;
    gateway.vote(DAO, U256::from(42), true).await.unwrap();

    let call = IDao::voteCall::abi_decode(wallet.sent()[0].input.input().unwrap()).unwrap();
    assert_eq!(call.proposalId, U256::from(42));
    assert!(call.support);
}

#[tokio::test]
async fn previews_proposal_id() {
    let (wallet, gateway) = connected().await;
    wallet.on_call(DAO, IDao::proposeCall::SELECTOR, U256::from(7).abi_encode());

    let submission = gateway.propose(DAO, "Add a loyalty discount").await.unwrap();
    assert_eq!(submission.expected_proposal_id, U256::from(7));
    assert_eq!(submission.handle.status(), TxStatus::Submitted);

    let requests = wallet.requests();
    assert_eq!(&requests[requests.len() - 2..], ["eth_call", "eth_sendTransaction"]);
}

#[tokio::test]
async fn reverting_proposal_is_not_submitted() {
    let (wallet, gateway) = connected().await;
    let revert = Revert { reason: "proposer has no tokens".to_string() }.abi_encode();
    wallet.on_call_error(DAO, IDao::proposeCall::SELECTOR, RpcError::execution_reverted(revert));

    let err = gateway.propose(DAO, "Free shipping").await.unwrap_err();
    match err {
        GatewayError::CallReverted { reason } => {
            assert_eq!(reason.0.as_deref(), Some("proposer has no tokens"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(wallet.sent().is_empty());
}
