/// Configuration for the relay server side: what to advertise on the hub and
/// the minimum balance and stake required before registering.
use std::env;
use std::str::FromStr;

use alloy::primitives::Address;

use super::{env_or, ConfigError};
use crate::constants::{
    DEFAULT_MANAGER_MIN_BALANCE, DEFAULT_MANAGER_MIN_STAKE, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RELAY_HUB_ADDRESS, DEFAULT_RELAY_PORT, DEFAULT_RELAY_URL,
};
use crate::models::U256;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Public url of this relay, as advertised on the hub.
    pub url: String,
    /// Appended to `url` when the url does not carry a port.
    pub port: u16,
    /// Hub the relay registers on; destination of registration transactions.
    pub relay_hub_address: String,
    /// Minimum manager balance before registration is attempted.
    pub manager_min_balance: U256,
    /// Minimum locked stake before registration is attempted.
    pub manager_min_stake: U256,
    /// Delay between two registration poll cycles.
    pub poll_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RELAY_URL.to_string(),
            port: DEFAULT_RELAY_PORT,
            relay_hub_address: DEFAULT_RELAY_HUB_ADDRESS.to_string(),
            manager_min_balance: U256::from(DEFAULT_MANAGER_MIN_BALANCE),
            manager_min_stake: U256::from(DEFAULT_MANAGER_MIN_STAKE),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Defaults
    ///
    /// - `RELAY_URL` defaults to `"http://localhost"`.
    /// - `RELAY_PORT` defaults to `8090`.
    /// - `RELAY_HUB_ADDRESS` defaults to the zero address.
    /// - `MANAGER_MIN_BALANCE` defaults to 0.1 RBTC in wei.
    /// - `MANAGER_MIN_STAKE` defaults to the hub minimum stake.
    /// - `POLL_INTERVAL_MS` defaults to `5000`.
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("RELAY_URL").unwrap_or(defaults.url),
            port: env_or("RELAY_PORT", defaults.port),
            relay_hub_address: env::var("RELAY_HUB_ADDRESS")
                .unwrap_or(defaults.relay_hub_address),
            manager_min_balance: env_or("MANAGER_MIN_BALANCE", defaults.manager_min_balance),
            manager_min_stake: env_or("MANAGER_MIN_STAKE", defaults.manager_min_stake),
            poll_interval_ms: env_or("POLL_INTERVAL_MS", defaults.poll_interval_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        }
        if Address::from_str(&self.relay_hub_address).is_err() {
            return Err(ConfigError::InvalidAddress {
                field: "relay_hub_address".to_string(),
                value: self.relay_hub_address.clone(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidTimeout(self.poll_interval_ms));
        }
        Ok(())
    }

    /// Url advertised on the hub: the configured url, with the configured
    /// port inserted after the host unless the url already names one.
    pub fn registration_url(&self) -> String {
        let (scheme, rest) = match self.url.split_once("://") {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, self.url.as_str()),
        };
        let (host, path) = match rest.find('/') {
            Some(index) => rest.split_at(index),
            None => (rest, ""),
        };
        if host.contains(':') || self.port == 0 {
            return self.url.clone();
        }
        let path = path.trim_end_matches('/');
        match scheme {
            Some(scheme) => format!("{}://{}:{}{}", scheme, host, self.port, path),
            None => format!("{}:{}{}", host, self.port, path),
        }
    }
}
