mod serde;
pub use serde::*;

mod address;
pub use address::*;
