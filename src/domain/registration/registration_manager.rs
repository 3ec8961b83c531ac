//! Registration lifecycle of a relay manager.
//!
//! The manager reacts to stake manager and hub events fetched by the poller:
//! it tracks stake and balance against the configured minimums, adds the
//! local worker and registers the relay url once every prerequisite holds,
//! and sweeps funds back to the owner when the stake is unlocked or
//! withdrawn. Side effects that the ledger only allows after a delay are
//! parked in a queue until their due block.
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};

use super::{DelayedEvents, PastEventsOutcome, RegistrationNotification, RegistrationState};
use crate::{
    config::ServerConfig,
    constants::{MIN_TX_GAS_COST, WORKERS_ADDED_LOOKUP_FROM_BLOCK},
    models::{
        bool_string, latest_event, AmountListener, AmountRequired, EventData, EventKey, EventKind,
        EventRecord, RegistrationError, RelayRecord, SendTransactionDetails, ServerAction,
        STAKE_MANAGEMENT_EVENTS, U256,
    },
    services::{BlockRange, LedgerFacade, TransactionSubmitter},
    utils::{address_to_topic, addresses_equal},
};

pub struct RegistrationManager<L, T>
where
    L: LedgerFacade,
    T: TransactionSubmitter,
{
    ledger: Arc<L>,
    transaction_manager: Arc<T>,
    config: ServerConfig,
    manager_address: String,
    worker_address: String,
    owner_address: Option<String>,
    balance_required: AmountRequired,
    stake_required: AmountRequired,
    /// Raised by the amount trackers when a requirement flips.
    requirement_changed: Arc<AtomicBool>,
    is_stake_locked: bool,
    last_worker_added_event: Option<EventRecord>,
    delayed_events: DelayedEvents,
    /// Stake events whose side effects already ran. A failed cycle is
    /// retried over the same range and must skip them.
    handled_stake_events: HashSet<EventKey>,
    relay_data: Option<RelayRecord>,
    notifications: Vec<RegistrationNotification>,
    unstaked: bool,
    initialized: bool,
}

fn flag_on_change(flag: &Arc<AtomicBool>) -> AmountListener {
    let flag = flag.clone();
    Box::new(move |_| flag.store(true, Ordering::Relaxed))
}

impl<L, T> RegistrationManager<L, T>
where
    L: LedgerFacade,
    T: TransactionSubmitter,
{
    pub fn new(
        ledger: Arc<L>,
        transaction_manager: Arc<T>,
        config: ServerConfig,
        manager_address: String,
        worker_address: String,
    ) -> Self {
        let requirement_changed = Arc::new(AtomicBool::new(false));
        let balance_required = AmountRequired::new("Balance", config.manager_min_balance)
            .with_listener(flag_on_change(&requirement_changed));
        let stake_required = AmountRequired::new("Stake", config.manager_min_stake)
            .with_listener(flag_on_change(&requirement_changed));

        Self {
            ledger,
            transaction_manager,
            config,
            manager_address,
            worker_address,
            owner_address: None,
            balance_required,
            stake_required,
            requirement_changed,
            is_stake_locked: false,
            last_worker_added_event: None,
            delayed_events: DelayedEvents::default(),
            handled_stake_events: HashSet::new(),
            relay_data: None,
            notifications: Vec::new(),
            unstaked: false,
            initialized: false,
        }
    }

    pub fn manager_address(&self) -> &str {
        &self.manager_address
    }

    pub fn worker_address(&self) -> &str {
        &self.worker_address
    }

    pub fn owner_address(&self) -> Option<&str> {
        self.owner_address.as_deref()
    }

    pub fn balance_required(&self) -> &AmountRequired {
        &self.balance_required
    }

    pub fn stake_required(&self) -> &AmountRequired {
        &self.stake_required
    }

    pub fn is_stake_locked(&self) -> bool {
        self.is_stake_locked
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn relay_data(&self) -> Option<&RelayRecord> {
        self.relay_data.as_ref()
    }

    pub fn last_worker_added_event(&self) -> Option<&EventRecord> {
        self.last_worker_added_event.as_ref()
    }

    pub fn delayed_events(&self) -> &DelayedEvents {
        &self.delayed_events
    }

    /// Looks up the latest `RelayWorkersAdded` evidence for this manager.
    /// Must be called exactly once before `handle_past_events`.
    pub async fn init(&mut self) -> Result<(), RegistrationError> {
        if self.initialized {
            return Err(RegistrationError::AlreadyInitialized);
        }
        self.config.validate()?;
        if self.last_worker_added_event.is_none() {
            self.last_worker_added_event = self.query_latest_worker_added_event().await?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Processes one poll cycle.
    ///
    /// Fetches stake manager events in `(last_scanned_block, current_block]`,
    /// refreshes the hub record, folds in `RelayWorkersAdded` evidence from
    /// `hub_events`, releases delayed events that are due, and (re)registers
    /// when the hub record is wrong and no registration is in flight, or when
    /// `force_registration` is set.
    pub async fn handle_past_events(
        &mut self,
        hub_events: &[EventRecord],
        last_scanned_block: u64,
        current_block: u64,
        force_registration: bool,
    ) -> Result<PastEventsOutcome, RegistrationError> {
        if !self.initialized {
            return Err(RegistrationError::NotInitialized);
        }

        let range = BlockRange::since(last_scanned_block, current_block);
        let stake_events = self
            .ledger
            .get_past_events_for_stake_management(
                STAKE_MANAGEMENT_EVENTS.to_vec(),
                vec![address_to_topic(&self.manager_address)],
                range,
            )
            .await?;
        log_events(&stake_events, range);

        // Nothing at or below `last_scanned_block` is fetched again.
        self.handled_stake_events
            .retain(|key| key.block_number > last_scanned_block);

        let mut transaction_hashes = Vec::new();
        for event in stake_events {
            let key = event.key();
            if self.handled_stake_events.contains(&key) {
                debug!(
                    "Skipping already handled {} event: {}",
                    event.kind(),
                    event.transaction_hash
                );
                continue;
            }
            match event.data {
                EventData::StakeAdded { .. } => self.refresh_stake().await?,
                EventData::StakeUnlocked { withdraw_block, .. } => {
                    self.refresh_stake().await?;
                    debug!(
                        "Delaying StakeUnlocked handling until block {}",
                        withdraw_block
                    );
                    if !self.delayed_events.push(withdraw_block, event) {
                        debug!("StakeUnlocked event is already queued");
                    }
                }
                EventData::StakeWithdrawn { .. } => {
                    self.refresh_stake().await?;
                    warn!("Handling StakeWithdrawn event: {}", event.transaction_hash);
                    transaction_hashes.extend(self.withdraw_all_funds(true, current_block).await?);
                }
                _ => debug!("Ignoring {} stake manager event", event.kind()),
            }
            self.handled_stake_events.insert(key);
        }

        let relay_data = self.fetch_relay_data().await?;
        self.update_relay_data(relay_data);

        for event in hub_events {
            if event.kind() != EventKind::RelayWorkersAdded {
                continue;
            }
            let is_later = self
                .last_worker_added_event
                .as_ref()
                .map(|cached| cached.is_followed_by(event))
                .unwrap_or(true);
            if is_later {
                self.last_worker_added_event = Some(event.clone());
            }
        }

        for event in self.delayed_events.extract_due(current_block) {
            if event.kind() == EventKind::StakeUnlocked {
                warn!("Handling StakeUnlocked event: {}", event.transaction_hash);
                transaction_hashes.extend(self.withdraw_all_funds(true, current_block).await?);
            }
        }

        let registration_correct = self.is_registration_correct();
        let registration_pending = self
            .transaction_manager
            .is_action_pending(ServerAction::RegisterServer)
            .await?;
        if !(registration_pending || registration_correct) || force_registration {
            transaction_hashes.extend(self.attempt_registration(current_block).await?);
        }

        Ok(PastEventsOutcome {
            transaction_hashes,
            notifications: self.take_notifications(),
        })
    }

    /// Adds the worker (unless already added or pending) and registers the
    /// relay url on the hub. Returns an empty list without submitting anything
    /// while the stake is not locked or stake or balance are below minimum.
    ///
    /// Once the prerequisites hold, register-server is always submitted; the
    /// caller decides whether registration is needed.
    pub async fn attempt_registration(
        &self,
        current_block: u64,
    ) -> Result<Vec<String>, RegistrationError> {
        let all_prerequisites_ok = self.is_stake_locked
            && self.stake_required.is_satisfied()
            && self.balance_required.is_satisfied();
        if !all_prerequisites_ok {
            info!("Not all prerequisites for registration are met yet. Registration attempt cancelled");
            return Ok(vec![]);
        }

        let mut transactions = Vec::new();
        let workers_added = self.is_worker_valid();
        let add_workers_pending = self
            .transaction_manager
            .is_action_pending(ServerAction::AddWorker)
            .await?;
        if !(workers_added || add_workers_pending) {
            transactions.push(self.add_relay_worker(current_block).await?);
        }

        let register_url = self.config.registration_url();
        let register_method = self.ledger.get_register_relay_method(&register_url).await?;
        let gas_limit = self
            .transaction_manager
            .attempt_estimate_gas("RegisterRelay", &register_method, &self.manager_address)
            .await?;
        let details = SendTransactionDetails::contract_call(
            &self.manager_address,
            &self.config.relay_hub_address,
            ServerAction::RegisterServer,
            register_method,
            gas_limit,
            current_block,
        );
        let sent = self.transaction_manager.send_transaction(details).await?;
        transactions.push(sent.transaction_hash);

        debug!(
            "Relay {} registered on hub {} with url {}",
            self.manager_address, self.config.relay_hub_address, register_url
        );
        Ok(transactions)
    }

    /// Sends the worker balance, and the manager balance when
    /// `withdraw_manager_funds` is set, to the owner. Accounts holding less
    /// than the cost of a transfer are skipped. Emits `Unstaked` in every case.
    pub async fn withdraw_all_funds(
        &mut self,
        withdraw_manager_funds: bool,
        current_block: u64,
    ) -> Result<Vec<String>, RegistrationError> {
        let mut transaction_hashes = Vec::new();

        match self.owner_address.clone() {
            Some(owner) => {
                let gas_price = self.ledger.get_gas_price().await?;
                let worker = self.worker_address.clone();
                transaction_hashes.extend(
                    self.send_balance_to_owner(&worker, &owner, gas_price, current_block)
                        .await?,
                );
                if withdraw_manager_funds {
                    let manager = self.manager_address.clone();
                    transaction_hashes.extend(
                        self.send_balance_to_owner(&manager, &owner, gas_price, current_block)
                            .await?,
                    );
                }
            }
            None => error!(
                "Owner of manager {} is unknown, cannot withdraw funds",
                self.manager_address
            ),
        }

        self.unstaked = true;
        self.notifications.push(RegistrationNotification::Unstaked);
        Ok(transaction_hashes)
    }

    async fn send_balance_to_owner(
        &self,
        account: &str,
        owner: &str,
        gas_price: u128,
        current_block: u64,
    ) -> Result<Option<String>, RegistrationError> {
        let tx_cost = U256::from(MIN_TX_GAS_COST) * U256::from(gas_price);
        let balance = self.ledger.get_balance(account).await?;
        if balance < tx_cost {
            info!(
                "Balance of {} too low to withdraw: {}, tx cost: {}",
                account, balance, tx_cost
            );
            return Ok(None);
        }

        info!("Sending balance {} of {} to owner {}", balance, account, owner);
        let details = SendTransactionDetails::value_transfer(
            account,
            owner,
            balance - tx_cost,
            MIN_TX_GAS_COST,
            gas_price,
            current_block,
        );
        let sent = self.transaction_manager.send_transaction(details).await?;
        Ok(Some(sent.transaction_hash))
    }

    /// Reads the manager balance into the balance requirement.
    pub async fn refresh_balance(&mut self) -> Result<(), RegistrationError> {
        let balance = self.ledger.get_balance(&self.manager_address).await?;
        self.balance_required.set_current_value(balance);
        self.report_requirement_change();
        Ok(())
    }

    /// Reads the stake into the stake requirement and lock flag. A zero stake
    /// leaves the cached values untouched.
    pub async fn refresh_stake(&mut self) -> Result<(), RegistrationError> {
        let stake_info = self.ledger.get_stake_info(&self.manager_address).await?;
        if stake_info.stake.is_zero() {
            return Ok(());
        }

        self.set_stake_locked(stake_info.is_locked());
        self.stake_required.set_current_value(stake_info.stake);
        self.report_requirement_change();

        if self.owner_address.is_none() {
            self.owner_address = Some(stake_info.owner);
            info!("Got staked for the first time");
            self.print_not_registered_message();
        }
        Ok(())
    }

    async fn add_relay_worker(&self, current_block: u64) -> Result<String, RegistrationError> {
        let method = self
            .ledger
            .get_add_relay_workers_method(vec![self.worker_address.clone()])
            .await?;
        let gas_limit = self
            .transaction_manager
            .attempt_estimate_gas("AddRelayWorkers", &method, &self.manager_address)
            .await?;
        let details = SendTransactionDetails::contract_call(
            &self.manager_address,
            &self.config.relay_hub_address,
            ServerAction::AddWorker,
            method,
            gas_limit,
            current_block,
        );
        let sent = self.transaction_manager.send_transaction(details).await?;
        Ok(sent.transaction_hash)
    }

    async fn query_latest_worker_added_event(
        &self,
    ) -> Result<Option<EventRecord>, RegistrationError> {
        let events = self
            .ledger
            .get_past_events_for_hub(
                vec![address_to_topic(&self.manager_address)],
                BlockRange::from(WORKERS_ADDED_LOOKUP_FROM_BLOCK),
                vec![EventKind::RelayWorkersAdded],
            )
            .await?;
        Ok(latest_event(events))
    }

    async fn fetch_relay_data(&self) -> Result<RelayRecord, RegistrationError> {
        self.ledger
            .get_relay_data(vec![self.manager_address.clone()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RegistrationError::RelayNotFound(self.manager_address.clone()))
    }

    fn update_relay_data(&mut self, relay_data: RelayRecord) {
        let was_listed = self
            .relay_data
            .as_ref()
            .map(|previous| previous.registered && !previous.penalized)
            .unwrap_or(false);
        let is_listed = relay_data.registered && !relay_data.penalized;
        if was_listed && !is_listed {
            warn!(
                "Relay {} is no longer listed on hub {} (penalized: {})",
                self.manager_address, self.config.relay_hub_address, relay_data.penalized
            );
            self.notifications.push(RegistrationNotification::Removed);
        }
        self.relay_data = Some(relay_data);
    }

    fn set_stake_locked(&mut self, locked: bool) {
        if self.is_stake_locked == locked {
            return;
        }
        self.is_stake_locked = locked;
        info!(
            "Manager stake is {} locked",
            if locked { "now" } else { "no longer" }
        );
        self.print_not_registered_message();
    }

    fn report_requirement_change(&self) {
        if self.requirement_changed.swap(false, Ordering::Relaxed) {
            self.print_not_registered_message();
        }
    }

    fn is_worker_valid(&self) -> bool {
        self.last_worker_added_event
            .as_ref()
            .map(|event| {
                event
                    .new_relay_workers()
                    .iter()
                    .any(|worker| addresses_equal(worker, &self.worker_address))
            })
            .unwrap_or(false)
    }

    /// True when the hub record carries this manager and the advertised url.
    pub fn is_registration_correct(&self) -> bool {
        match &self.relay_data {
            Some(relay) => {
                relay
                    .manager
                    .as_deref()
                    .map(|manager| addresses_equal(manager, &self.manager_address))
                    .unwrap_or(false)
                    && relay.url == self.config.registration_url()
            }
            None => false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.stake_required.is_satisfied() && self.is_stake_locked && self.is_registration_correct()
    }

    pub fn registration_state(&self) -> RegistrationState {
        if self.unstaked {
            RegistrationState::Unstaking
        } else if self.owner_address.is_none() {
            RegistrationState::Unstaked
        } else if !self.is_stake_locked {
            RegistrationState::StakedUnlocked
        } else if !(self.stake_required.is_satisfied() && self.balance_required.is_satisfied()) {
            RegistrationState::StakedLocked
        } else if !self.is_registration_correct() {
            RegistrationState::Registerable
        } else {
            RegistrationState::Registered
        }
    }

    /// Drains the lifecycle notifications emitted since the last call.
    pub fn take_notifications(&mut self) -> Vec<RegistrationNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// Explains which prerequisites are still missing. Silent once the hub
    /// record is correct.
    pub fn print_not_registered_message(&self) {
        if self.is_registration_correct() {
            return;
        }
        info!(
            "\nNot registered yet. Prerequisites:\n{}\n{}\nStake locked   | {}\nManager        | {}\nWorker         | {}\nOwner          | {}\n",
            self.balance_required.describe(),
            self.stake_required.describe(),
            bool_string(self.is_stake_locked),
            self.manager_address,
            self.worker_address,
            self.owner_address.as_deref().unwrap_or("unknown")
        );
    }
}

fn log_events(events: &[EventRecord], range: BlockRange) {
    if events.is_empty() {
        return;
    }
    info!(
        "Handling {} events emitted since block: {}",
        events.len(),
        range.from_block
    );
    for event in events {
        info!(
            "\nName      | {:<25}\nBlock     | {}\nTxHash    | {}\n",
            event.kind().name(),
            event.block_number,
            event.transaction_hash
        );
    }
}
