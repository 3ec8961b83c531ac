//! Relay-side staking and registration lifecycle.
mod delayed_events;
pub use delayed_events::*;

mod registration_manager;
pub use registration_manager::*;

mod types;
pub use types::*;

#[cfg(test)]
pub(crate) mod test_helpers;
