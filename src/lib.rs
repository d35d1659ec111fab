//! Tally - terminal expense and income ledger
//!
//! This library provides the core of the `tally` command-line tool: a SQLite
//! backed ledger of dated expenses and income, monthly per-category budgets,
//! and the reports derived from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, money, months)
//! - `storage`: SQLite storage layer and query surface
//! - `services`: Date normalization, the ledger and budget tracking
//! - `reports`: Monthly summary, dashboard and statistics
//! - `display`: Terminal tables and colors
//! - `export`: CSV export
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally_cli::models::{Money, NewTransaction, TransactionKind};
//! use tally_cli::services::Ledger;
//! use tally_cli::storage::Storage;
//!
//! let storage = Storage::open_in_memory()?;
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let ledger = Ledger::with_today(&storage, today);
//!
//! ledger.add(NewTransaction::new(today, Money::from_cents(1250), "Food", TransactionKind::Expense))?;
//! assert_eq!(ledger.count()?, 1);
//! # Ok::<(), tally_cli::error::TallyError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
