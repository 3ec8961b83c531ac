//! Property-based tests for log file naming.
//!
//!   Refer to `src/logging/mod.rs` for more details.
use relay_coordinator::logging::rolled_file_path;
use proptest::{prelude::*, test_runner::Config};
use std::path::Path;

proptest! {
  #![proptest_config(Config {
    cases: 500, ..Config::default()
  })]

  /// The rolled file stays in the base directory and keeps the base stem.
  #[test]
  fn prop_rolled_file_path_keeps_directory_and_stem(
    dir in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
    stem in "[a-zA-Z0-9_-]{1,16}",
    date in "[0-9]{4}-[0-9]{2}-[0-9]{2}",
    index in 1u32..1000
  ) {
      let base = Path::new(&dir).join(format!("{stem}.log"));
      let rolled = rolled_file_path(&base, &date, index);
      prop_assert_eq!(rolled.parent(), Some(Path::new(&dir)));
      prop_assert_eq!(
        rolled.file_name().and_then(|name| name.to_str()).map(str::to_string),
        Some(format!("{stem}-{date}.{index}.log"))
      );
  }
}
