//! Relay Coordination Library
//!
//! Both halves of the relay coordination protocol of a transaction-relay
//! network:
//!
//! - Relay side: the staking and registration lifecycle of a relay manager,
//!   driven by stake manager and hub events read from the ledger
//! - Client side: picking a live, compatible relay from tiered candidates by
//!   racing liveness probes
//!
//! # Module Structure
//!
//! - `config`: Environment-driven configuration
//! - `constants`: Protocol constants and defaults
//! - `domain`: Registration lifecycle and relay selection
//! - `jobs`: Ledger polling loop with retry backoff
//! - `logging`: Logging setup
//! - `models`: Events, relay records, transaction descriptors and errors
//! - `services`: Ledger, transaction submission, known relays and ping client
//! - `utils`: Common utilities and helper functions

pub mod config;
pub mod constants;
pub mod domain;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
