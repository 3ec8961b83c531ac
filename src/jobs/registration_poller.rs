//! Ledger polling loop for a relay manager.
//!
//! Each cycle reads the current block, refreshes the manager balance, fetches
//! the hub events emitted since the last scanned block and hands everything to
//! the `RegistrationManager`. Cycles never overlap: the poller owns the manager
//! and awaits each cycle to completion before sleeping. A failed cycle does not
//! advance the scanned block, so the same range is retried after a backoff.
use std::sync::Arc;
use std::time::Duration;

use eyre::{Result, WrapErr};
use log::{debug, error, info, warn};

use super::BackoffRetryPolicy;
use crate::{
    domain::{PastEventsOutcome, RegistrationManager},
    models::EventKind,
    services::{BlockRange, LedgerFacade, TransactionSubmitter},
    utils::address_to_topic,
};

const HUB_EVENTS: [EventKind; 2] = [EventKind::RelayServerRegistered, EventKind::RelayWorkersAdded];

pub struct RegistrationPoller<L, T>
where
    L: LedgerFacade,
    T: TransactionSubmitter,
{
    ledger: Arc<L>,
    manager: RegistrationManager<L, T>,
    poll_interval: Duration,
    retry_policy: BackoffRetryPolicy,
    last_scanned_block: u64,
}

impl<L, T> RegistrationPoller<L, T>
where
    L: LedgerFacade,
    T: TransactionSubmitter,
{
    pub fn new(ledger: Arc<L>, manager: RegistrationManager<L, T>, poll_interval: Duration) -> Self {
        Self {
            ledger,
            manager,
            poll_interval,
            retry_policy: BackoffRetryPolicy::default(),
            last_scanned_block: 0,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: BackoffRetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Skips history up to and including `block`.
    pub fn with_last_scanned_block(mut self, block: u64) -> Self {
        self.last_scanned_block = block;
        self
    }

    pub fn manager(&self) -> &RegistrationManager<L, T> {
        &self.manager
    }

    pub fn last_scanned_block(&self) -> u64 {
        self.last_scanned_block
    }

    /// Runs one cycle. Initializes the manager on first use. Does nothing when
    /// no block was mined since the last cycle.
    pub async fn poll_once(&mut self) -> Result<PastEventsOutcome> {
        if !self.manager.is_initialized() {
            self.manager
                .init()
                .await
                .wrap_err("Failed to initialize registration manager")?;
        }

        let current_block = self
            .ledger
            .get_block_number()
            .await
            .wrap_err("Failed to read current block")?;
        if current_block <= self.last_scanned_block {
            debug!("No new block since {}", self.last_scanned_block);
            return Ok(PastEventsOutcome::default());
        }

        self.manager.refresh_balance().await?;

        let hub_events = self
            .ledger
            .get_past_events_for_hub(
                vec![address_to_topic(self.manager.manager_address())],
                BlockRange::since(self.last_scanned_block, current_block),
                HUB_EVENTS.to_vec(),
            )
            .await
            .wrap_err("Failed to fetch hub events")?;

        let outcome = self
            .manager
            .handle_past_events(&hub_events, self.last_scanned_block, current_block, false)
            .await?;
        self.last_scanned_block = current_block;

        if !outcome.transaction_hashes.is_empty() {
            info!(
                "Submitted {} transactions at block {}: {:?}",
                outcome.transaction_hashes.len(),
                current_block,
                outcome.transaction_hashes
            );
        }
        Ok(outcome)
    }

    /// Polls until the manager reports `Unstaked`, then hands the manager
    /// back. Gives up once consecutive failures exhaust the retry policy.
    pub async fn run(mut self) -> Result<RegistrationManager<L, T>> {
        info!(
            "Starting registration poller for manager {}",
            self.manager.manager_address()
        );
        let mut failures = 0;
        loop {
            match self.poll_once().await {
                Ok(outcome) => {
                    failures = 0;
                    if outcome.is_unstaked() {
                        warn!(
                            "Manager {} unstaked, stopping registration poller",
                            self.manager.manager_address()
                        );
                        return Ok(self.manager);
                    }
                    debug!("Registration state: {}", self.manager.registration_state());
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(err) => match self.retry_policy.backoff_duration(failures) {
                    Some(backoff) => {
                        failures += 1;
                        warn!(
                            "Poll cycle failed (attempt {}), retrying in {:?}: {:?}",
                            failures, backoff, err
                        );
                        tokio::time::sleep(backoff).await;
                    }
                    None => {
                        error!("Registration poller giving up after {} failures", failures + 1);
                        return Err(err);
                    }
                },
            }
        }
    }
}
