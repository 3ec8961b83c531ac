/// This module drives the registration lifecycle from ledger polling.
mod registration_poller;
pub use registration_poller::*;

/// This module implements retry backoff for failed poll cycles.
mod retry_backoff;
pub use retry_backoff::*;
