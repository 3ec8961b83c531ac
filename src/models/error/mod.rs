mod ledger;
pub use ledger::*;

mod submission;
pub use submission::*;

mod registration;
pub use registration::*;

mod selection;
pub use selection::*;
