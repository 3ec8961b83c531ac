use std::collections::HashMap;
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::models::{RelayInfo, RelayRecord, SelectionError};

/// Result of probing one slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceOutcome {
    pub winner: Option<RelayInfo>,
    /// Failures observed before the winner, keyed by relay url.
    pub errors: HashMap<String, SelectionError>,
}

/// Probes every record concurrently and returns as soon as one succeeds.
///
/// Probes still running at that point are dropped, so their results are
/// never observed.
pub async fn race_to_success<F, Fut>(records: Vec<RelayRecord>, probe: F) -> RaceOutcome
where
    F: Fn(RelayRecord) -> Fut,
    Fut: Future<Output = Result<RelayInfo, SelectionError>>,
{
    let mut probes: FuturesUnordered<_> = records
        .into_iter()
        .map(|record| {
            let url = record.url.clone();
            let probe = probe(record);
            async move { (url, probe.await) }
        })
        .collect();

    let mut errors = HashMap::new();
    while let Some((url, result)) = probes.next().await {
        match result {
            Ok(relay_info) => {
                return RaceOutcome {
                    winner: Some(relay_info),
                    errors,
                };
            }
            Err(err) => {
                debug!("Relay {} failed to ping: {}", url, err);
                errors.insert(url, err);
            }
        }
    }

    RaceOutcome {
        winner: None,
        errors,
    }
}
