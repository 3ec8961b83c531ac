//! Picks a relay for one transaction.
//!
//! Candidates come from the known-relays directory in priority tiers. They
//! are probed a slice at a time; the first relay that answers ready and
//! passes the ping filter is returned. Relays that failed, and the winner,
//! are dropped from the pool so a later call moves on to fresh candidates.
use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use super::{race_to_success, PingFilter, RaceOutcome, TierPool};
use crate::{
    config::ClientConfig,
    models::{RelayInfo, RelayRecord, SelectionError, TransactionRequirements},
    services::{PingClient, RelayDirectory},
};

pub struct RelaySelectionManager<D, P, F>
where
    D: RelayDirectory,
    P: PingClient,
    F: PingFilter,
{
    requirements: TransactionRequirements,
    directory: Arc<D>,
    ping_client: Arc<P>,
    ping_filter: F,
    config: ClientConfig,
    pool: Option<TierPool>,
}

impl<D, P, F> RelaySelectionManager<D, P, F>
where
    D: RelayDirectory,
    P: PingClient,
    F: PingFilter,
{
    pub fn new(
        requirements: TransactionRequirements,
        directory: Arc<D>,
        ping_client: Arc<P>,
        ping_filter: F,
        config: ClientConfig,
    ) -> Self {
        Self {
            requirements,
            directory,
            ping_client,
            ping_filter,
            config,
            pool: None,
        }
    }

    /// Loads the candidate tiers for this transaction. Fails on a config
    /// that could never probe a candidate.
    pub async fn init(&mut self) -> Result<(), SelectionError> {
        self.config.validate()?;
        let tiers = self
            .directory
            .get_relays_sorted_for_transaction(&self.requirements)
            .await?;
        debug!(
            "Loaded {} candidate relays in {} tiers",
            tiers.iter().map(Vec::len).sum::<usize>(),
            tiers.len()
        );
        self.pool = Some(TierPool::new(tiers));
        Ok(())
    }

    pub fn requirements(&self) -> &TransactionRequirements {
        &self.requirements
    }

    /// Remaining candidates, or `None` before `init`.
    pub fn remaining_relays(&self) -> Option<Vec<Vec<RelayRecord>>> {
        self.pool.as_ref().map(TierPool::tiers)
    }

    /// Returns the first relay that pings successfully, or `None` once every
    /// candidate has been tried.
    pub async fn select_next_relay(&mut self) -> Result<Option<RelayInfo>, SelectionError> {
        loop {
            let slice = self.get_next_slice()?;
            if slice.is_empty() {
                info!("No relay could be pinged successfully");
                return Ok(None);
            }

            let outcome = self.race_to_success(slice).await;
            self.handle_race_results(&outcome);
            if let Some(winner) = outcome.winner {
                info!("Selected relay {}", winner.relay_data.url);
                return Ok(Some(winner));
            }
        }
    }

    pub fn get_next_slice(&mut self) -> Result<Vec<RelayRecord>, SelectionError> {
        let slice_size = self.config.slice_size;
        let pool = self.pool.as_mut().ok_or(SelectionError::NotInitialized)?;
        Ok(pool.next_slice(slice_size))
    }

    /// Pings one relay and applies the filter.
    pub async fn get_relay_address_ping(
        &self,
        relay: RelayRecord,
    ) -> Result<RelayInfo, SelectionError> {
        debug!("Pinging relay {}", relay.url);
        let ping_response = self.ping_client.get_ping_response(&relay.url).await?;
        if !ping_response.ready {
            return Err(SelectionError::NotReady(relay.url));
        }
        self.ping_filter.check(&ping_response, &self.requirements)?;
        Ok(RelayInfo::from_ping(ping_response, relay))
    }

    pub async fn race_to_success(&self, relays: Vec<RelayRecord>) -> RaceOutcome {
        race_to_success(relays, |relay| self.get_relay_address_ping(relay)).await
    }

    /// Removes the winner and every failed relay from all tiers.
    pub fn handle_race_results(&mut self, outcome: &RaceOutcome) {
        let Some(pool) = self.pool.as_mut() else {
            return;
        };
        let mut urls: HashSet<&str> = outcome.errors.keys().map(String::as_str).collect();
        if let Some(winner) = &outcome.winner {
            urls.insert(winner.relay_data.url.as_str());
        }
        pool.remove_urls(&urls);
    }
}
