use polypay_networks::{NetworkProfile, POLYGON_MAINNET_CHAIN_ID, POLYGON_MUMBAI_CHAIN_ID};
use polypay_test_utils::{ALICE, BOB, MockWallet, init_tracing, manager_for};
use polypay_wallet::{
    DisconnectReason, ErrorCode, RpcError, SessionEvent, SessionManager, WalletError,
    WalletSession,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn connect_without_provider_leaves_session_untouched() {
    let manager = SessionManager::new(None, NetworkProfile::polygon_mainnet());
    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::ProviderUnavailable));
    assert_eq!(manager.session().snapshot(), WalletSession::disconnected());
    assert_eq!(manager.get_active_account().await.unwrap(), None);
}

#[tokio::test]
async fn connect_on_known_chain_switches_once() {
    init_tracing();
    let wallet = Arc::new(MockWallet::new([ALICE, BOB], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);

    let account = manager.connect().await.unwrap();
    assert_eq!(account, ALICE);
    assert_eq!(wallet.requests(), ["eth_requestAccounts", "wallet_switchEthereumChain"]);

    let session = manager.session().snapshot();
    assert!(session.is_connected());
    assert_eq!(session.account(), Some(ALICE));
    assert_eq!(session.active_chain_id(), Some(POLYGON_MAINNET_CHAIN_ID));
}

#[tokio::test]
async fn connect_adds_unknown_chain_then_switches() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1));
    let manager = manager_for(&wallet);

    manager.connect().await.unwrap();
    assert_eq!(
        wallet.requests(),
        [
            "eth_requestAccounts",
            "wallet_switchEthereumChain",
            "wallet_addEthereumChain",
            "wallet_switchEthereumChain",
        ]
    );
    assert_eq!(wallet.current_chain(), POLYGON_MAINNET_CHAIN_ID);
}

#[tokio::test]
async fn wrapped_unrecognized_chain_is_detected() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1).with_known_chain(POLYGON_MAINNET_CHAIN_ID));
    wallet.fail_next(
        "wallet_switchEthereumChain",
        RpcError::new(ErrorCode::InternalError)
            .with_data(json!({ "originalError": { "code": 4902 } })),
    );
    let manager = manager_for(&wallet);

    manager.connect().await.unwrap();
    assert_eq!(wallet.count("wallet_addEthereumChain"), 1);
    assert_eq!(wallet.count("wallet_switchEthereumChain"), 2);
}

#[tokio::test]
async fn other_switch_failure_is_not_retried() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1));
    wallet.fail_next("wallet_switchEthereumChain", RpcError::new(ErrorCode::InternalError));
    let manager = manager_for(&wallet);

    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::Provider(_)), "{err:?}");
    assert_eq!(wallet.count("wallet_switchEthereumChain"), 1);
    assert_eq!(wallet.count("wallet_addEthereumChain"), 0);
    assert!(!manager.session().is_connected());
}

#[tokio::test]
async fn rejected_switch_leaves_session_disconnected() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1));
    wallet.fail_next("wallet_switchEthereumChain", RpcError::user_rejected());
    let manager = manager_for(&wallet);

    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::UserRejected));
    assert!(!manager.session().is_connected());
}

#[tokio::test]
async fn rejected_account_request() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    wallet.fail_next("eth_requestAccounts", RpcError::user_rejected());
    let manager = manager_for(&wallet);

    assert!(matches!(manager.connect().await, Err(WalletError::UserRejected)));
    assert_eq!(wallet.count("wallet_switchEthereumChain"), 0);
}

#[tokio::test]
async fn empty_account_list_fails() {
    let wallet = Arc::new(MockWallet::new([], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    assert!(matches!(manager.connect().await, Err(WalletError::NoAccounts)));
}

#[tokio::test]
async fn restores_authorized_session_without_prompt() {
    let wallet =
        Arc::new(MockWallet::new([ALICE], POLYGON_MUMBAI_CHAIN_ID).authorized());
    let manager = manager_for(&wallet);

    assert_eq!(manager.get_active_account().await.unwrap(), Some(ALICE));
    assert_eq!(wallet.requests(), ["eth_accounts", "eth_chainId"]);
    assert_eq!(manager.session().snapshot().active_chain_id(), Some(POLYGON_MUMBAI_CHAIN_ID));

    // Connected sessions answer from memory.
    assert_eq!(manager.get_active_account().await.unwrap(), Some(ALICE));
    assert_eq!(wallet.requests().len(), 2);
}

#[tokio::test]
async fn unauthorized_site_has_no_active_account() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    assert_eq!(manager.get_active_account().await.unwrap(), None);
    assert_eq!(wallet.count("eth_requestAccounts"), 0);
}

#[tokio::test]
async fn ensure_ready_moves_restored_session_to_target() {
    let wallet = Arc::new(
        MockWallet::new([ALICE], POLYGON_MUMBAI_CHAIN_ID)
            .with_known_chain(POLYGON_MAINNET_CHAIN_ID)
            .authorized(),
    );
    let manager = manager_for(&wallet);
    manager.get_active_account().await.unwrap();

    assert_eq!(manager.ensure_ready().await.unwrap(), ALICE);
    assert_eq!(wallet.count("eth_requestAccounts"), 0);
    assert_eq!(wallet.current_chain(), POLYGON_MAINNET_CHAIN_ID);

    // Already on target: no further round trips.
    let before = wallet.requests().len();
    manager.ensure_ready().await.unwrap();
    assert_eq!(wallet.requests().len(), before);
}

#[tokio::test]
async fn failed_add_is_not_followed_by_a_switch() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1));
    wallet.fail_next("wallet_addEthereumChain", RpcError::user_rejected());
    let manager = manager_for(&wallet);

    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::UserRejected), "{err:?}");
    assert_eq!(wallet.count("wallet_switchEthereumChain"), 1);
    assert!(!manager.session().is_connected());

    wallet.fail_next("wallet_addEthereumChain", RpcError::new(ErrorCode::InternalError));
    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::Provider(_)), "{err:?}");
    assert_eq!(wallet.count("wallet_switchEthereumChain"), 2);
    assert_eq!(wallet.current_chain(), 1);
}

#[tokio::test]
async fn chain_still_unknown_after_add_is_reported() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1));
    wallet.fail_next("wallet_switchEthereumChain", RpcError::unrecognized_chain("0x89"));
    wallet.fail_next("wallet_switchEthereumChain", RpcError::unrecognized_chain("0x89"));
    let manager = manager_for(&wallet);

    let err = manager.connect().await.unwrap_err();
    match err {
        WalletError::UnrecognizedChain(chain) => assert_eq!(chain, "0x89"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(wallet.count("wallet_addEthereumChain"), 1);
    assert_eq!(wallet.count("wallet_switchEthereumChain"), 2);
    assert!(!manager.session().is_connected());
}

#[tokio::test]
async fn connect_announces_session_before_chain_events() {
    let wallet = Arc::new(MockWallet::new([ALICE], 1));
    let manager = manager_for(&wallet);
    let mut events = manager.subscribe();

    manager.connect().await.unwrap();
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Connected { account: ALICE, chain_id: Some(POLYGON_MAINNET_CHAIN_ID) }
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn account_change_resets_session() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    manager.connect().await.unwrap();
    let mut events = manager.subscribe();

    manager.handle_accounts_changed(&[ALICE]);
    assert!(manager.session().is_connected());

    manager.handle_accounts_changed(&[BOB]);
    assert!(!manager.session().is_connected());
    assert_eq!(manager.session().account(), None);

    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Disconnected(DisconnectReason::AccountChanged(BOB))
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn revoked_accounts_and_chain_changes() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    manager.connect().await.unwrap();
    let mut events = manager.subscribe();

    manager.handle_chain_changed(POLYGON_MUMBAI_CHAIN_ID);
    assert!(!manager.session().snapshot().is_ready_for(POLYGON_MAINNET_CHAIN_ID));
    manager.handle_accounts_changed(&[]);

    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::ChainChanged { chain_id: POLYGON_MUMBAI_CHAIN_ID }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Disconnected(DisconnectReason::AccountsRevoked)
    );
}

#[tokio::test]
async fn disconnect_forgets_account() {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    manager.connect().await.unwrap();

    manager.disconnect();
    assert_eq!(manager.session().snapshot(), WalletSession::disconnected());
}
