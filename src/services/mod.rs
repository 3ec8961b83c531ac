//! # Services Module
//!
//! Collaborators the coordination logic consumes: ledger access, transaction
//! submission, the known-relays directory and the relay ping client.

mod ledger;
pub use ledger::*;

mod transaction_manager;
pub use transaction_manager::*;

mod known_relays;
pub use known_relays::*;

mod http_client;
pub use http_client::*;
