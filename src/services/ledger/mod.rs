//! Ledger facade consumed by the registration lifecycle.
//!
//! Reading balances, stakes and events and encoding contract calls belongs
//! to the node integration; the coordination logic only sees this trait.

use async_trait::async_trait;

use crate::models::{EventKind, EventRecord, LedgerError, MethodCall, RelayRecord, StakeInfo, U256};

#[cfg(test)]
use mockall::automock;

/// Inclusive block range for event queries. `to_block: None` means latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from_block: u64,
    pub to_block: Option<u64>,
}

impl BlockRange {
    /// Blocks after `last_scanned_block`, up to and including `current_block`.
    pub fn since(last_scanned_block: u64, current_block: u64) -> Self {
        Self {
            from_block: last_scanned_block + 1,
            to_block: Some(current_block),
        }
    }

    pub fn from(from_block: u64) -> Self {
        Self {
            from_block,
            to_block: None,
        }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait LedgerFacade: Send + Sync {
    /// Stake registered for `manager` on the stake manager.
    async fn get_stake_info(&self, manager: &str) -> Result<StakeInfo, LedgerError>;

    /// Native currency balance of `address`.
    async fn get_balance(&self, address: &str) -> Result<U256, LedgerError>;

    async fn get_block_number(&self) -> Result<u64, LedgerError>;

    async fn get_gas_price(&self) -> Result<u128, LedgerError>;

    /// Stake manager events of the given kinds matching `topics`, in ledger order.
    async fn get_past_events_for_stake_management(
        &self,
        names: Vec<EventKind>,
        topics: Vec<String>,
        range: BlockRange,
    ) -> Result<Vec<EventRecord>, LedgerError>;

    /// Hub events of the given kinds matching `topics`, in ledger order.
    async fn get_past_events_for_hub(
        &self,
        topics: Vec<String>,
        range: BlockRange,
        names: Vec<EventKind>,
    ) -> Result<Vec<EventRecord>, LedgerError>;

    /// Hub registration records for the given managers.
    async fn get_relay_data(&self, managers: Vec<String>) -> Result<Vec<RelayRecord>, LedgerError>;

    async fn get_add_relay_workers_method(
        &self,
        workers: Vec<String>,
    ) -> Result<MethodCall, LedgerError>;

    async fn get_register_relay_method(&self, url: &str) -> Result<MethodCall, LedgerError>;
}
