//! Property-based tests for handing out relay candidates in slices.
use proptest::{prelude::*, test_runner::Config};
use relay_coordinator::{domain::TierPool, models::RelayRecord};
use std::collections::HashSet;

fn build_tiers(sizes: &[usize]) -> Vec<Vec<RelayRecord>> {
    sizes
        .iter()
        .enumerate()
        .map(|(tier, size)| {
            (0..*size)
                .map(|index| RelayRecord::from_url(format!("https://relay-{tier}-{index}")))
                .collect()
        })
        .collect()
}

fn tier_of(record: &RelayRecord) -> &str {
    record.url.split('-').nth(1).unwrap_or_default()
}

proptest! {
  #![proptest_config(Config {
    cases: 300, ..Config::default()
  })]

  /// Slices are bounded, never mix tiers, and together hand out every
  /// record exactly once in priority order.
  #[test]
  fn prop_slices_cover_pool_in_order(
    sizes in prop::collection::vec(0usize..6, 0..5),
    slice_size in 1usize..5
  ) {
      let tiers = build_tiers(&sizes);
      let mut pool = TierPool::new(tiers.clone());

      let mut handed_out = Vec::new();
      loop {
          let slice = pool.next_slice(slice_size);
          if slice.is_empty() {
              break;
          }
          prop_assert!(slice.len() <= slice_size);
          let slice_tiers: HashSet<&str> = slice.iter().map(tier_of).collect();
          prop_assert_eq!(slice_tiers.len(), 1);
          handed_out.extend(slice);
      }

      let expected: Vec<RelayRecord> = tiers.into_iter().flatten().collect();
      prop_assert_eq!(handed_out, expected);
      prop_assert!(pool.is_exhausted());
  }

  /// Removing urls twice leaves the same pool as removing them once.
  #[test]
  fn prop_removal_is_idempotent(
    sizes in prop::collection::vec(0usize..6, 1..5),
    removed in prop::collection::vec((0usize..5, 0usize..6), 0..8)
  ) {
      let mut pool = TierPool::new(build_tiers(&sizes));
      let urls: Vec<String> = removed
          .iter()
          .map(|(tier, index)| format!("https://relay-{tier}-{index}"))
          .collect();
      let url_set: HashSet<&str> = urls.iter().map(String::as_str).collect();

      pool.remove_urls(&url_set);
      let once = pool.tiers();
      pool.remove_urls(&url_set);

      prop_assert_eq!(pool.tiers(), once.clone());
      prop_assert!(once
          .iter()
          .flatten()
          .all(|record| !url_set.contains(record.url.as_str())));
  }
}
