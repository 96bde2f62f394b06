mod gateway;

use alloy_primitives::{Address, address};
use polypay_contracts::ContractGateway;
use polypay_networks::POLYGON_MAINNET_CHAIN_ID;
use polypay_test_utils::{ALICE, MockWallet, manager_for};
use std::sync::Arc;

const TOKEN: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
const SALE: Address = address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512");
const DAO: Address = address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");

/// A gateway whose session is connected as [`ALICE`].
async fn connected() -> (Arc<MockWallet>, ContractGateway) {
    let wallet = Arc::new(MockWallet::new([ALICE], POLYGON_MAINNET_CHAIN_ID));
    let manager = manager_for(&wallet);
    manager.connect().await.unwrap();
    (wallet.clone(), ContractGateway::from_manager(&manager).unwrap())
}
