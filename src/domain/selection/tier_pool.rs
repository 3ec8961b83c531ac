use std::collections::HashSet;

use crate::models::RelayRecord;

#[derive(Debug, Clone)]
struct PoolEntry {
    record: RelayRecord,
    issued: bool,
}

/// Candidate relays grouped in priority tiers, highest priority first.
///
/// Slicing hands records out without removing them; a handed-out record is
/// never offered again. Records leave the pool only through `remove_urls`.
#[derive(Debug, Clone, Default)]
pub struct TierPool {
    tiers: Vec<Vec<PoolEntry>>,
}

impl TierPool {
    pub fn new(tiers: Vec<Vec<RelayRecord>>) -> Self {
        let tiers = tiers
            .into_iter()
            .map(|tier| {
                tier.into_iter()
                    .map(|record| PoolEntry {
                        record,
                        issued: false,
                    })
                    .collect()
            })
            .collect();
        Self { tiers }
    }

    /// Up to `slice_size` records not handed out before, in tier order, all
    /// taken from the first tier that still has such records.
    pub fn next_slice(&mut self, slice_size: usize) -> Vec<RelayRecord> {
        let Some(tier) = self
            .tiers
            .iter_mut()
            .find(|tier| tier.iter().any(|entry| !entry.issued))
        else {
            return Vec::new();
        };

        tier.iter_mut()
            .filter(|entry| !entry.issued)
            .take(slice_size)
            .map(|entry| {
                entry.issued = true;
                entry.record.clone()
            })
            .collect()
    }

    /// Drops every record whose url is in `urls`, from every tier.
    pub fn remove_urls(&mut self, urls: &HashSet<&str>) {
        for tier in &mut self.tiers {
            tier.retain(|entry| !urls.contains(entry.record.url.as_str()));
        }
    }

    /// Records still in the pool, handed out or not.
    pub fn tiers(&self) -> Vec<Vec<RelayRecord>> {
        self.tiers
            .iter()
            .map(|tier| tier.iter().map(|entry| entry.record.clone()).collect())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once every record has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.tiers.iter().flatten().all(|entry| entry.issued)
    }
}
