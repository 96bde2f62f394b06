use alloy_primitives::{Address, TxHash, address};
use axum::{Json, Router, extract::State, routing::post};
use parking_lot::Mutex;
use polypay_networks::NetworkProfile;
use polypay_wallet::{
    Eip1193Provider, HttpTransport, ProviderError, SessionManager, WalletError, WalletProvider,
};
use serde_json::{Value, json};
use std::{collections::VecDeque, sync::Arc, time::Duration};

const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

#[derive(Default)]
struct Node {
    seen: Mutex<Vec<Value>>,
    replies: Mutex<VecDeque<Value>>,
}

async fn rpc(State(node): State<Arc<Node>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    node.seen.lock().push(req);
    let mut reply = node.replies.lock().pop_front().unwrap_or(json!({ "result": null }));
    reply["jsonrpc"] = json!("2.0");
    reply["id"] = id;
    Json(reply)
}

/// Serves scripted JSON-RPC replies in order.
async fn spawn_node(replies: Vec<Value>) -> (Arc<Node>, HttpTransport) {
    let node = Arc::new(Node { seen: Mutex::default(), replies: Mutex::new(replies.into()) });
    let app = Router::new().route("/", post(rpc)).with_state(node.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap()).parse().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (node, HttpTransport::new(url))
}

#[tokio::test]
async fn connects_over_http() {
    let (node, transport) = spawn_node(vec![
        json!({ "result": [ALICE] }),
        json!({ "error": { "code": 4902, "message": "Unrecognized chain ID \"0x89\"" } }),
        json!({ "result": null }),
        json!({ "result": null }),
    ])
    .await;
    let provider: Arc<dyn WalletProvider> = Arc::new(Eip1193Provider::new(transport));
    let manager = SessionManager::new(Some(provider), NetworkProfile::polygon_mainnet());

    assert_eq!(manager.connect().await.unwrap(), ALICE);

    let seen = node.seen.lock();
    let methods: Vec<_> = seen.iter().map(|req| req["method"].as_str().unwrap()).collect();
    assert_eq!(
        methods,
        [
            "eth_requestAccounts",
            "wallet_switchEthereumChain",
            "wallet_addEthereumChain",
            "wallet_switchEthereumChain",
        ]
    );
    assert_eq!(seen[1]["params"], json!([{ "chainId": "0x89" }]));
    assert_eq!(seen[2]["params"][0]["rpcUrls"], json!(["https://polygon-rpc.com/"]));
}

#[tokio::test]
async fn maps_rejection_over_http() {
    let (_node, transport) = spawn_node(vec![json!({
        "error": { "code": 4001, "message": "User rejected the request." }
    })])
    .await;
    let provider: Arc<dyn WalletProvider> = Arc::new(Eip1193Provider::new(transport));
    let manager = SessionManager::new(Some(provider), NetworkProfile::polygon_mainnet());

    assert!(matches!(manager.connect().await, Err(WalletError::UserRejected)));
}

#[tokio::test]
async fn waits_for_receipt() {
    let hash = TxHash::repeat_byte(0xab);
    let (node, transport) = spawn_node(vec![
        json!({ "result": null }),
        json!({ "result": { "hash": hash } }),
        json!({ "result": {
            "transactionHash": hash,
            "blockNumber": "0x10",
            "status": "0x1"
        } }),
    ])
    .await;
    let provider = Eip1193Provider::new(transport).with_poll_interval(Duration::from_millis(10));

    let receipt = provider.wait_for_receipt(hash).await.unwrap();
    assert_eq!(receipt.block_number(), Some(16));
    assert_eq!(receipt.is_failure(), Some(false));
    assert_eq!(node.seen.lock().len(), 3);
}

#[tokio::test]
async fn forgotten_transaction_is_dropped() {
    let hash = TxHash::repeat_byte(0xcd);
    let (_node, transport) = spawn_node(vec![
        json!({ "result": null }),
        json!({ "result": { "hash": hash } }),
        json!({ "result": null }),
        json!({ "result": null }),
    ])
    .await;
    let provider = Eip1193Provider::new(transport).with_poll_interval(Duration::from_millis(10));

    let err = provider.wait_for_receipt(hash).await.unwrap_err();
    assert!(matches!(err, ProviderError::Dropped(h) if h == hash));
}

#[tokio::test]
async fn chain_id_decodes_hex_quantity() {
    let (_node, transport) = spawn_node(vec![json!({ "result": "0x13881" })]).await;
    let provider = Eip1193Provider::new(transport);
    assert_eq!(provider.chain_id().await.unwrap(), 80001);
}
