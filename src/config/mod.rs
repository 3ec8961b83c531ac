//! Configuration for the relay coordinator.
//!
//! Both halves read their settings from environment variables:
//! - `ServerConfig`: relay-side registration lifecycle
//! - `ClientConfig`: client-side relay selection
mod server_config;
pub use server_config::*;

mod client_config;
pub use client_config::*;

mod error;
pub use error::*;

use std::env;
use std::str::FromStr;

/// Reads `name` and parses it, falling back to `default` when the variable is
/// missing or malformed.
pub(crate) fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
