use alloy_primitives::{U256, address};
use polypay_contracts::{ConfirmedTransaction, ContractGateway, TransactionTracker};
use polypay_networks::POLYGON_MAINNET_CHAIN_ID;
use polypay_orders::{
    OrderPaymentRecord, OrderReconciler, PAYMENT_PATH, ReconciliationError, TransferConfirmation,
};
use polypay_test_utils::{ALICE, MockBackend, MockWallet, manager_for};
use serde_json::json;
use similar_asserts::assert_eq;
use std::sync::Arc;

/// Runs `n` votes through the mock wallet until they are confirmed.
async fn confirmed_votes(n: usize) -> Vec<ConfirmedTransaction> {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    manager.connect().await.unwrap();
    let gateway = ContractGateway::from_manager(&manager).unwrap();
    let tracker = TransactionTracker::new(gateway.provider().clone());
    let dao = address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");

    let mut confirmed = Vec::with_capacity(n);
    for id in 0..n {
        let handle = gateway.vote(dao, U256::from(id), true).await.unwrap();
        confirmed.push(tracker.wait(handle).await.unwrap());
    }
    confirmed
}

async fn confirmed_vote() -> ConfirmedTransaction {
    confirmed_votes(1).await.remove(0)
}

#[tokio::test]
async fn reports_payment() {
    let backend = MockBackend::spawn().await;
    let reconciler = OrderReconciler::new(&backend.url()).unwrap();
    let tx = confirmed_vote().await;

    let ack = reconciler.report_payment(&OrderPaymentRecord::new(17, &tx)).await.unwrap();
    assert_eq!(ack.tx_hash, tx.hash());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/token/transfer");
    assert_eq!(requests[0].body, json!({ "order_id": 17, "tx_hash": tx.hash() }));
}

#[tokio::test]
async fn reports_at_most_once() {
    let backend = MockBackend::spawn().await;
    let reconciler = OrderReconciler::new(&backend.url()).unwrap();
    let tx = confirmed_vote().await;
    let record = OrderPaymentRecord::new(17, &tx);

    reconciler.report_payment(&record).await.unwrap();
    let err = reconciler.report_payment(&record).await.unwrap_err();
    assert!(matches!(err, ReconciliationError::AlreadyReported(hash) if hash == tx.hash()));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn failed_report_is_not_retried() {
    let backend = MockBackend::spawn().await;
    backend.respond_with(500);
    let reconciler = OrderReconciler::new(&backend.url()).unwrap();
    let tx = confirmed_vote().await;
    let record = OrderPaymentRecord::new(3, &tx);

    let err = reconciler.report_payment(&record).await.unwrap_err();
    assert!(matches!(err, ReconciliationError::Status { status, .. } if status.as_u16() == 500));
    assert!(reconciler.was_reported(PAYMENT_PATH, tx.hash()));

    backend.respond_with(200);
    assert!(matches!(
        reconciler.report_payment(&record).await,
        Err(ReconciliationError::AlreadyReported(_))
    ));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn confirms_vote_and_purchase() {
    let backend = MockBackend::spawn().await;
    let reconciler = OrderReconciler::new(&backend.url()).unwrap();
    let txs = confirmed_votes(2).await;
    let (vote, purchase) = (&txs[0], &txs[1]);

    reconciler.confirm_transfer(&TransferConfirmation::vote(5, vote)).await.unwrap();
    reconciler.confirm_transfer(&TransferConfirmation::purchase(9, purchase)).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].path, "/api/token/transfer/confirm");
    assert_eq!(
        requests[0].body,
        json!({ "tx_hash": vote.hash(), "type": "vote", "vote_id": 5 })
    );
    assert_eq!(
        requests[1].body,
        json!({ "tx_hash": purchase.hash(), "type": "purchase", "purchase_id": 9 })
    );
}

#[tokio::test]
async fn unreachable_backend() {
    let reconciler = OrderReconciler::new("http://127.0.0.1:1").unwrap();
    let tx = confirmed_vote().await;
    let err = reconciler.report_payment(&OrderPaymentRecord::new(1, &tx)).await.unwrap_err();
    assert!(matches!(err, ReconciliationError::Http(_)));
}
