//! Registration lifecycle constants.

/// Gas used by a plain value transfer. Balances below `gas_price * MIN_TX_GAS_COST`
/// are not worth sweeping to the owner.
pub const MIN_TX_GAS_COST: u64 = 21_000;

/// Block scanned from when looking up the latest `RelayWorkersAdded` evidence.
pub const WORKERS_ADDED_LOOKUP_FROM_BLOCK: u64 = 1;

pub const DEFAULT_MANAGER_MIN_BALANCE: u128 = 100_000_000_000_000_000; // 0.1 RBTC in wei
pub const DEFAULT_MANAGER_MIN_STAKE: u128 = 5_000_000_000_000_000; // matches hub minimumStake

pub const DEFAULT_RELAY_URL: &str = "http://localhost";
pub const DEFAULT_RELAY_PORT: u16 = 8090;
pub const DEFAULT_RELAY_HUB_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
