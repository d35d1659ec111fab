//! Core data models for Tally
//!
//! This module contains the data structures of the ledger domain:
//! transactions, monthly budgets and the value types they are built from.

pub mod budget;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::{Band, Budget, BudgetStatus};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthParseError};
pub use transaction::{
    KindFilter, NewTransaction, Transaction, TransactionKind, TransactionValidationError,
};
