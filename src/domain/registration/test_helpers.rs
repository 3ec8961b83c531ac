//! Shared test utilities for registration lifecycle tests.

use std::sync::{Arc, Mutex};

use crate::{
    config::ServerConfig,
    models::{EventData, EventRecord, MethodCall, RelayRecord, SendTransactionDetails, SentTransaction, U256},
    services::{MockLedgerFacade, MockTransactionSubmitter},
};

use super::RegistrationManager;

pub const MANAGER_ADDRESS: &str = "0x1111111111111111111111111111111111111111";
pub const WORKER_ADDRESS: &str = "0x2222222222222222222222222222222222222222";
pub const OWNER_ADDRESS: &str = "0x3333333333333333333333333333333333333333";
pub const HUB_ADDRESS: &str = "0x4444444444444444444444444444444444444444";
pub const RELAY_URL: &str = "http://relay.example.com:8090";

pub const MIN_STAKE: u64 = 1_000;
pub const MIN_BALANCE: u64 = 500;

/// Helper struct holding the mocked collaborators.
pub struct TestMocks {
    pub ledger: MockLedgerFacade,
    pub transaction_manager: MockTransactionSubmitter,
}

pub fn default_test_mocks() -> TestMocks {
    TestMocks {
        ledger: MockLedgerFacade::new(),
        transaction_manager: MockTransactionSubmitter::new(),
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        url: RELAY_URL.to_string(),
        port: 8090,
        relay_hub_address: HUB_ADDRESS.to_string(),
        manager_min_balance: U256::from(MIN_BALANCE),
        manager_min_stake: U256::from(MIN_STAKE),
        poll_interval_ms: 100,
    }
}

pub fn make_test_registration_manager(
    mocks: TestMocks,
) -> RegistrationManager<MockLedgerFacade, MockTransactionSubmitter> {
    RegistrationManager::new(
        Arc::new(mocks.ledger),
        Arc::new(mocks.transaction_manager),
        test_config(),
        MANAGER_ADDRESS.to_string(),
        WORKER_ADDRESS.to_string(),
    )
}

fn event(block_number: u64, log_index: u64, data: EventData) -> EventRecord {
    EventRecord {
        block_number,
        transaction_index: 0,
        log_index,
        transaction_hash: format!("0xtx{block_number}-{log_index}"),
        data,
    }
}

pub fn stake_added_event(block_number: u64) -> EventRecord {
    event(
        block_number,
        0,
        EventData::StakeAdded {
            relay_manager: MANAGER_ADDRESS.to_string(),
            owner: OWNER_ADDRESS.to_string(),
            stake: U256::from(MIN_STAKE),
            unstake_delay: 100,
        },
    )
}

pub fn stake_unlocked_event(block_number: u64, withdraw_block: u64) -> EventRecord {
    event(
        block_number,
        0,
        EventData::StakeUnlocked {
            relay_manager: MANAGER_ADDRESS.to_string(),
            owner: OWNER_ADDRESS.to_string(),
            withdraw_block,
        },
    )
}

pub fn stake_withdrawn_event(block_number: u64) -> EventRecord {
    event(
        block_number,
        0,
        EventData::StakeWithdrawn {
            relay_manager: MANAGER_ADDRESS.to_string(),
            owner: OWNER_ADDRESS.to_string(),
            amount: U256::from(MIN_STAKE),
        },
    )
}

pub fn workers_added_event(block_number: u64, log_index: u64, workers: &[&str]) -> EventRecord {
    event(
        block_number,
        log_index,
        EventData::RelayWorkersAdded {
            relay_manager: MANAGER_ADDRESS.to_string(),
            new_relay_workers: workers.iter().map(|w| w.to_string()).collect(),
            workers_count: workers.len() as u64,
        },
    )
}

pub fn registered_relay_record() -> RelayRecord {
    RelayRecord {
        manager: Some(MANAGER_ADDRESS.to_string()),
        url: RELAY_URL.to_string(),
        penalized: false,
        registered: true,
        stake_added: true,
    }
}

pub fn unregistered_relay_record() -> RelayRecord {
    RelayRecord {
        manager: Some(MANAGER_ADDRESS.to_string()),
        url: String::new(),
        penalized: false,
        registered: false,
        stake_added: true,
    }
}

pub fn method(name: &str) -> MethodCall {
    MethodCall {
        name: name.to_string(),
        data: format!("0x{name}"),
    }
}

/// Makes `send_transaction` succeed, recording every submission. Hashes are
/// `0x{action}-{n}` with `n` counting submissions from zero.
pub fn record_sent_transactions(
    transaction_manager: &mut MockTransactionSubmitter,
) -> Arc<Mutex<Vec<SendTransactionDetails>>> {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let recorder = sent.clone();
    transaction_manager
        .expect_send_transaction()
        .returning(move |details| {
            let mut sent = recorder.lock().unwrap();
            let transaction_hash = format!("0x{}-{}", details.server_action, sent.len());
            sent.push(details);
            Box::pin(async move { Ok(SentTransaction { transaction_hash }) })
        });
    sent
}
