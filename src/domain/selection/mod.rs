//! Client-side relay selection: tiered candidates probed in concurrent slices.
mod filters;
pub use filters::*;

mod race;
pub use race::*;

mod relay_selection_manager;
pub use relay_selection_manager::*;

mod tier_pool;
pub use tier_pool::*;
