//! # Models Module
//!
//! Contains core data structures and type definitions shared by the
//! registration lifecycle and relay selection.

pub use alloy::primitives::U256;

mod amount_required;
pub use amount_required::*;

mod event;
pub use event::*;

mod relay;
pub use relay::*;

mod transaction;
pub use transaction::*;

mod error;
pub use error::*;
