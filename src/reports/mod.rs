//! Reports module for Tally
//!
//! Read-only roll-ups of the ledger: the monthly summary, the dashboard and
//! all-time statistics. Every report re-scans the database when generated.

pub mod dashboard;
pub mod statistics;
pub mod summary;

pub use dashboard::{Dashboard, DEFAULT_TOP_CATEGORIES};
pub use statistics::{MonthTotals, Statistics};
pub use summary::{CategorySummary, MonthlySummary};
