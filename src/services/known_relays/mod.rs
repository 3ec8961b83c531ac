//! Known-relays directory: supplies candidate relays grouped in priority tiers.

use async_trait::async_trait;

use crate::models::{RelayRecord, SelectionError, TransactionRequirements};

#[cfg(test)]
use mockall::automock;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait RelayDirectory: Send + Sync {
    /// Candidate tiers for `requirements`, highest priority first.
    async fn get_relays_sorted_for_transaction(
        &self,
        requirements: &TransactionRequirements,
    ) -> Result<Vec<Vec<RelayRecord>>, SelectionError>;
}

/// Directory over a fixed relay list: preferred relays (known only by url)
/// form the first tier, every active known relay the second.
#[derive(Debug, Clone, Default)]
pub struct StaticRelayDirectory {
    preferred_relay_urls: Vec<String>,
    known_relays: Vec<RelayRecord>,
}

impl StaticRelayDirectory {
    pub fn new(preferred_relay_urls: Vec<String>, known_relays: Vec<RelayRecord>) -> Self {
        Self {
            preferred_relay_urls,
            known_relays,
        }
    }

    fn is_active(relay: &RelayRecord) -> bool {
        relay.registered && relay.stake_added && !relay.penalized
    }
}

#[async_trait]
impl RelayDirectory for StaticRelayDirectory {
    async fn get_relays_sorted_for_transaction(
        &self,
        _requirements: &TransactionRequirements,
    ) -> Result<Vec<Vec<RelayRecord>>, SelectionError> {
        let preferred: Vec<RelayRecord> = self
            .preferred_relay_urls
            .iter()
            .map(RelayRecord::from_url)
            .collect();
        let active: Vec<RelayRecord> = self
            .known_relays
            .iter()
            .filter(|relay| Self::is_active(relay))
            .filter(|relay| !self.preferred_relay_urls.contains(&relay.url))
            .cloned()
            .collect();

        Ok(vec![preferred, active])
    }
}
