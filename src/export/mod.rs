//! Export module for Tally
//!
//! Writes ledger transactions to CSV for use in spreadsheets.

pub mod csv;

pub use self::csv::{export_transactions_csv, write_transactions_csv, ExportOutcome};
