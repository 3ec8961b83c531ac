//! Relay records shared by the registration lifecycle and relay selection.
use serde::{Deserialize, Serialize};

use crate::utils::deserialize_gas_price;

/// On-chain registration record of a relay, as known to the hub or to the
/// known-relays directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRecord {
    /// Unknown when the directory only knew the relay by url.
    pub manager: Option<String>,
    pub url: String,
    pub penalized: bool,
    pub registered: bool,
    pub stake_added: bool,
}

impl RelayRecord {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Reply of a relay to a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub relay_worker_address: String,
    pub relay_manager_address: String,
    pub relay_hub_address: String,
    #[serde(deserialize_with = "deserialize_gas_price")]
    pub min_gas_price: u128,
    pub ready: bool,
    pub version: String,
}

/// A relay that answered a probe and passed the compatibility filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayInfo {
    pub ping_response: PingResponse,
    pub relay_data: RelayRecord,
}

impl RelayInfo {
    /// Pairs a probe reply with its record, filling identity fields the
    /// directory did not know from the reply.
    pub fn from_ping(ping_response: PingResponse, mut relay_data: RelayRecord) -> Self {
        let manager_unknown = relay_data
            .manager
            .as_deref()
            .map(str::is_empty)
            .unwrap_or(true);
        if manager_unknown && !ping_response.relay_manager_address.is_empty() {
            relay_data.manager = Some(ping_response.relay_manager_address.clone());
        }
        Self {
            ping_response,
            relay_data,
        }
    }
}

/// What the client wants relayed; consulted by ping filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequirements {
    pub from: String,
    pub to: String,
    pub data: String,
    /// Gas price the client is willing to pay, if already decided.
    pub gas_price: Option<u128>,
    pub is_smart_wallet_deploy: bool,
}
