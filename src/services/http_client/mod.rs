//! Relay ping client.
//!
//! A probe is a `GET {relay_url}/getaddr`; the relay answers with its worker
//! and manager addresses, its minimum gas price and whether it is ready to
//! relay. Probe timeouts are enforced here, not by the selection logic.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::constants::PING_PATH;
use crate::models::{PingResponse, SelectionError};

#[cfg(test)]
use mockall::automock;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait PingClient: Send + Sync {
    async fn get_ping_response(&self, relay_url: &str) -> Result<PingResponse, SelectionError>;
}

#[derive(Debug, Clone)]
pub struct HttpPingClient {
    client: Client,
}

impl HttpPingClient {
    pub fn new(timeout: Duration) -> Result<Self, SelectionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SelectionError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn ping_url(relay_url: &str) -> String {
        format!("{}{}", relay_url.trim_end_matches('/'), PING_PATH)
    }
}

#[async_trait]
impl PingClient for HttpPingClient {
    async fn get_ping_response(&self, relay_url: &str) -> Result<PingResponse, SelectionError> {
        let url = Self::ping_url(relay_url);
        debug!("Pinging relay at {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let ping_response = response.json::<PingResponse>().await?;

        debug!(
            "Relay {} answered: ready={} manager={}",
            relay_url, ping_response.ready, ping_response.relay_manager_address
        );
        Ok(ping_response)
    }
}
