//! # Domain Module
//!
//! Core coordination logic:
//!
//! * Relay registration lifecycle, driven by ledger events
//! * Client-side relay selection over tiered candidates

mod registration;
pub use registration::*;
#[cfg(test)]
pub(crate) use registration::test_helpers as registration_test_helpers;

mod selection;
pub use selection::*;
