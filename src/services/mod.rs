//! Service layer for Tally
//!
//! Services sit on top of the storage layer and own validation and logging
//! for the operations the CLI performs.

pub mod budget;
pub mod dates;
pub mod ledger;

pub use budget::BudgetTracker;
pub use dates::DateNormalizer;
pub use ledger::{Ledger, TransactionFilter};
