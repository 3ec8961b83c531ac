//! This module contains all the constant values used in the system
mod registration;
pub use registration::*;

mod selection;
pub use selection::*;
