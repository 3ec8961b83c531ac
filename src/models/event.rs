//! Decoded ledger events consumed by the registration lifecycle.
use serde::{Deserialize, Serialize};
use std::fmt;

use super::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    StakeAdded,
    StakeUnlocked,
    StakeWithdrawn,
    StakePenalized,
    RelayWorkersAdded,
    RelayServerRegistered,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::StakeAdded => "StakeAdded",
            EventKind::StakeUnlocked => "StakeUnlocked",
            EventKind::StakeWithdrawn => "StakeWithdrawn",
            EventKind::StakePenalized => "StakePenalized",
            EventKind::RelayWorkersAdded => "RelayWorkersAdded",
            EventKind::RelayServerRegistered => "RelayServerRegistered",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stake manager events the registration lifecycle reacts to.
pub const STAKE_MANAGEMENT_EVENTS: [EventKind; 3] = [
    EventKind::StakeAdded,
    EventKind::StakeUnlocked,
    EventKind::StakeWithdrawn,
];

/// Decoded event arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "returnValues")]
pub enum EventData {
    StakeAdded {
        relay_manager: String,
        owner: String,
        stake: U256,
        unstake_delay: u64,
    },
    StakeUnlocked {
        relay_manager: String,
        owner: String,
        withdraw_block: u64,
    },
    StakeWithdrawn {
        relay_manager: String,
        owner: String,
        amount: U256,
    },
    StakePenalized {
        relay_manager: String,
        beneficiary: String,
        reward: U256,
    },
    RelayWorkersAdded {
        relay_manager: String,
        new_relay_workers: Vec<String>,
        workers_count: u64,
    },
    RelayServerRegistered {
        relay_manager: String,
        url: String,
    },
}

impl EventData {
    pub fn kind(&self) -> EventKind {
        match self {
            EventData::StakeAdded { .. } => EventKind::StakeAdded,
            EventData::StakeUnlocked { .. } => EventKind::StakeUnlocked,
            EventData::StakeWithdrawn { .. } => EventKind::StakeWithdrawn,
            EventData::StakePenalized { .. } => EventKind::StakePenalized,
            EventData::RelayWorkersAdded { .. } => EventKind::RelayWorkersAdded,
            EventData::RelayServerRegistered { .. } => EventKind::RelayServerRegistered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub block_number: u64,
    pub transaction_index: u64,
    pub log_index: u64,
    pub transaction_hash: String,
}

/// A decoded log together with its position on the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub block_number: u64,
    pub transaction_index: u64,
    pub log_index: u64,
    pub transaction_hash: String,
    #[serde(flatten)]
    pub data: EventData,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Ledger position used to order events: block, then transaction, then log.
    pub fn position(&self) -> (u64, u64, u64) {
        (self.block_number, self.transaction_index, self.log_index)
    }

    /// Identifies one log across repeated fetches of the same block range.
    pub fn key(&self) -> EventKey {
        EventKey {
            block_number: self.block_number,
            transaction_index: self.transaction_index,
            log_index: self.log_index,
            transaction_hash: self.transaction_hash.clone(),
        }
    }

    /// True if `other` was emitted strictly after `self`.
    pub fn is_followed_by(&self, other: &EventRecord) -> bool {
        other.position() > self.position()
    }

    /// Workers listed by a `RelayWorkersAdded` event, empty for any other event.
    pub fn new_relay_workers(&self) -> &[String] {
        match &self.data {
            EventData::RelayWorkersAdded {
                new_relay_workers, ..
            } => new_relay_workers,
            _ => &[],
        }
    }
}

/// Returns the event emitted last, if any.
pub fn latest_event(events: Vec<EventRecord>) -> Option<EventRecord> {
    events.into_iter().reduce(|latest, candidate| {
        if latest.is_followed_by(&candidate) {
            candidate
        } else {
            latest
        }
    })
}

/// Stake registered for a relay manager on the stake manager contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StakeInfo {
    pub stake: U256,
    pub unstake_delay: u64,
    /// Zero while the stake is locked; set once the owner unlocks it.
    pub withdraw_block: u64,
    pub owner: String,
}

impl StakeInfo {
    pub fn is_locked(&self) -> bool {
        self.withdraw_block == 0
    }
}
