//! Relay selection against scripted in-memory relays.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use relay_coordinator::{
    config::ClientConfig,
    domain::{GasPricePingFilter, RelaySelectionManager},
    models::{PingResponse, RelayRecord, SelectionError, TransactionRequirements},
    services::{PingClient, RelayDirectory, StaticRelayDirectory},
};

#[derive(Clone)]
enum Reply {
    Ready { delay_ms: u64, min_gas_price: u128 },
    NotReady,
    Down { delay_ms: u64 },
}

#[derive(Default)]
struct ScriptedRelays {
    replies: HashMap<String, Reply>,
    pinged: Mutex<Vec<String>>,
}

impl ScriptedRelays {
    fn with(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    fn pinged(&self) -> Vec<String> {
        self.pinged.lock().unwrap().clone()
    }
}

#[async_trait]
impl PingClient for ScriptedRelays {
    async fn get_ping_response(&self, relay_url: &str) -> Result<PingResponse, SelectionError> {
        self.pinged.lock().unwrap().push(relay_url.to_string());
        let reply = self
            .replies
            .get(relay_url)
            .cloned()
            .unwrap_or(Reply::Down { delay_ms: 0 });
        match reply {
            Reply::Ready {
                delay_ms,
                min_gas_price,
            } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(PingResponse {
                    relay_worker_address: format!("{relay_url}/worker"),
                    relay_manager_address: format!("{relay_url}/manager"),
                    relay_hub_address: "0xhub".to_string(),
                    min_gas_price,
                    ready: true,
                    version: "2.0.0".to_string(),
                })
            }
            Reply::NotReady => Ok(PingResponse::default()),
            Reply::Down { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Err(SelectionError::Transport(format!("{relay_url} unreachable")))
            }
        }
    }
}

struct FixedTiers(Vec<Vec<RelayRecord>>);

#[async_trait]
impl RelayDirectory for FixedTiers {
    async fn get_relays_sorted_for_transaction(
        &self,
        _requirements: &TransactionRequirements,
    ) -> Result<Vec<Vec<RelayRecord>>, SelectionError> {
        Ok(self.0.clone())
    }
}

fn records(urls: &[&str]) -> Vec<RelayRecord> {
    urls.iter().map(|url| RelayRecord::from_url(*url)).collect()
}

fn requirements(gas_price: u128) -> TransactionRequirements {
    TransactionRequirements {
        from: "0xfrom".to_string(),
        to: "0xto".to_string(),
        data: "0x".to_string(),
        gas_price: Some(gas_price),
        is_smart_wallet_deploy: false,
    }
}

#[tokio::test(start_paused = true)]
async fn test_tiers_are_walked_in_slices() {
    let relays = Arc::new(
        ScriptedRelays::default()
            .with("A", Reply::Down { delay_ms: 50 })
            .with("B", Reply::NotReady)
            .with(
                "C",
                Reply::Ready {
                    delay_ms: 100,
                    min_gas_price: 1,
                },
            )
            .with(
                "D",
                Reply::Ready {
                    delay_ms: 900,
                    min_gas_price: 1,
                },
            )
            .with(
                "E",
                Reply::Ready {
                    delay_ms: 10,
                    min_gas_price: 1,
                },
            ),
    );
    let directory = Arc::new(FixedTiers(vec![
        records(&["A", "B"]),
        records(&["C", "D", "E"]),
    ]));
    let mut manager = RelaySelectionManager::new(
        requirements(10),
        directory,
        relays.clone(),
        GasPricePingFilter,
        ClientConfig::default().with_slice_size(2),
    );
    manager.init().await.unwrap();

    let first = manager.select_next_relay().await.unwrap().unwrap();
    assert_eq!(first.relay_data.url, "C");
    assert_eq!(first.relay_data.manager.as_deref(), Some("C/manager"));

    // D lost the race and is not offered again
    let second = manager.select_next_relay().await.unwrap().unwrap();
    assert_eq!(second.relay_data.url, "E");

    assert_eq!(manager.select_next_relay().await.unwrap(), None);

    let mut pinged = relays.pinged();
    pinged.sort();
    assert_eq!(pinged, vec!["A", "B", "C", "D", "E"]);
}

#[tokio::test(start_paused = true)]
async fn test_expensive_relays_are_skipped() {
    let relays = Arc::new(
        ScriptedRelays::default()
            .with(
                "https://cheap.example",
                Reply::Ready {
                    delay_ms: 500,
                    min_gas_price: 5,
                },
            )
            .with(
                "https://expensive.example",
                Reply::Ready {
                    delay_ms: 10,
                    min_gas_price: 50,
                },
            ),
    );
    let directory = Arc::new(FixedTiers(vec![records(&[
        "https://expensive.example",
        "https://cheap.example",
    ])]));
    let mut manager = RelaySelectionManager::new(
        requirements(10),
        directory,
        relays,
        GasPricePingFilter,
        ClientConfig::default(),
    );
    manager.init().await.unwrap();

    let relay = manager.select_next_relay().await.unwrap().unwrap();
    assert_eq!(relay.relay_data.url, "https://cheap.example");
    assert_eq!(manager.select_next_relay().await.unwrap(), None);
}

#[tokio::test]
async fn test_preferred_relays_are_tried_before_known_relays() {
    let relays = Arc::new(
        ScriptedRelays::default()
            .with(
                "https://preferred.example",
                Reply::Ready {
                    delay_ms: 0,
                    min_gas_price: 1,
                },
            )
            .with(
                "https://known.example",
                Reply::Ready {
                    delay_ms: 0,
                    min_gas_price: 1,
                },
            ),
    );
    let known = RelayRecord {
        manager: Some("0xknown".to_string()),
        url: "https://known.example".to_string(),
        penalized: false,
        registered: true,
        stake_added: true,
    };
    let directory = Arc::new(StaticRelayDirectory::new(
        vec!["https://preferred.example".to_string()],
        vec![known.clone()],
    ));
    let mut manager = RelaySelectionManager::new(
        requirements(10),
        directory,
        relays,
        GasPricePingFilter,
        ClientConfig::default(),
    );
    manager.init().await.unwrap();

    let preferred = manager.select_next_relay().await.unwrap().unwrap();
    assert_eq!(preferred.relay_data.url, "https://preferred.example");
    assert_eq!(
        preferred.relay_data.manager.as_deref(),
        Some("https://preferred.example/manager")
    );

    let fallback = manager.select_next_relay().await.unwrap().unwrap();
    assert_eq!(fallback.relay_data, known);
}
