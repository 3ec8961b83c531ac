/// Configuration for client-side relay selection.
use std::time::Duration;

use super::{env_or, ConfigError};
use crate::constants::{DEFAULT_PING_TIMEOUT_MS, DEFAULT_RELAY_SLICE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Number of candidates probed concurrently in one round.
    pub slice_size: usize,
    /// Timeout applied to every liveness probe.
    pub ping_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            slice_size: DEFAULT_RELAY_SLICE_SIZE,
            ping_timeout_ms: DEFAULT_PING_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Reads `RELAY_SLICE_SIZE` and `PING_TIMEOUT_MS`, falling back to the
    /// defaults (3 and 10000) when unset or malformed.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            slice_size: env_or("RELAY_SLICE_SIZE", defaults.slice_size),
            ping_timeout_ms: env_or("PING_TIMEOUT_MS", defaults.ping_timeout_ms),
        }
    }

    pub fn with_slice_size(mut self, slice_size: usize) -> Self {
        self.slice_size = slice_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slice_size == 0 {
            return Err(ConfigError::InvalidSliceSize(self.slice_size));
        }
        if self.ping_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(self.ping_timeout_ms));
        }
        Ok(())
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }
}
