use serde::Serialize;
use std::fmt;

/// Lifecycle signals for the process hosting a relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationNotification {
    /// Funds were swept to the owner; the relay must stop serving.
    Unstaked,
    /// The hub no longer lists the relay.
    Removed,
}

/// Result of one `handle_past_events` cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PastEventsOutcome {
    /// Hashes of every transaction submitted during the cycle, in submission order.
    pub transaction_hashes: Vec<String>,
    pub notifications: Vec<RegistrationNotification>,
}

impl PastEventsOutcome {
    pub fn is_unstaked(&self) -> bool {
        self.notifications
            .contains(&RegistrationNotification::Unstaked)
    }
}

/// Registration progress derived from the manager's stored flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationState {
    /// No stake observed yet.
    Unstaked,
    /// Stake present but unlocked, or not yet locked.
    StakedUnlocked,
    /// Stake locked, but stake or manager balance below the minimum.
    StakedLocked,
    /// All prerequisites met; the hub record does not match yet.
    Registerable,
    Registered,
    /// Funds were withdrawn; the relay is leaving.
    Unstaking,
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistrationState::Unstaked => "unstaked",
            RegistrationState::StakedUnlocked => "staked (unlocked)",
            RegistrationState::StakedLocked => "staked (locked)",
            RegistrationState::Registerable => "registerable",
            RegistrationState::Registered => "registered",
            RegistrationState::Unstaking => "unstaking",
        };
        f.write_str(name)
    }
}
