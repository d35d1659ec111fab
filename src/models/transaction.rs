//! Transaction model
//!
//! A transaction is one dated expense or income entry. Amounts are always
//! stored as positive magnitudes; the direction comes from [`TransactionKind`].

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Whether money left or entered the ledger
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    /// The token stored in the database and written to exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!("Unknown transaction type: '{}'", other)),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// Kind filter used by list, search and export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KindFilter {
    #[default]
    All,
    Expense,
    Income,
}

impl KindFilter {
    /// The kind to match, or `None` when every kind is accepted
    pub fn kind(&self) -> Option<TransactionKind> {
        match self {
            Self::All => None,
            Self::Expense => Some(TransactionKind::Expense),
            Self::Income => Some(TransactionKind::Income),
        }
    }

    pub fn matches(&self, kind: TransactionKind) -> bool {
        self.kind().map_or(true, |k| k == kind)
    }
}

/// A stored ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Row id assigned by the store
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Positive magnitude of the transaction
    pub amount: Money,

    /// Free-form, case-sensitive category label
    pub category: String,

    /// Optional description
    pub description: Option<String>,

    /// Expense or income
    pub kind: TransactionKind,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Amount with direction applied: income positive, expense negative
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.kind,
            self.amount
        )
    }
}

/// A transaction that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
    pub description: Option<String>,
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
            description: None,
            kind,
        }
    }

    /// Attach a description; blank descriptions are dropped
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Check the stored-record invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// Validation errors for new transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => write!(
                f,
                "Amount must be greater than zero (got {}); use --type income for money received",
                amount
            ),
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount cannot exceed {} (got {})",
                Money::MAX_AMOUNT,
                amount
            ),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_validate_positive_amount() {
        let txn = NewTransaction::new(
            test_date(),
            Money::from_cents(5000),
            "Food",
            TransactionKind::Expense,
        );
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_and_negative() {
        for cents in [0, -100] {
            let txn = NewTransaction::new(
                test_date(),
                Money::from_cents(cents),
                "Food",
                TransactionKind::Expense,
            );
            assert_eq!(
                txn.validate(),
                Err(TransactionValidationError::NonPositiveAmount(
                    Money::from_cents(cents)
                ))
            );
        }
    }

    #[test]
    fn test_validate_amount_ceiling() {
        let at_limit = NewTransaction::new(
            test_date(),
            Money::MAX_AMOUNT,
            "Salary",
            TransactionKind::Income,
        );
        assert!(at_limit.validate().is_ok());

        let huge = Money::from_cents(9_000_000_000_000_000_000);
        let txn = NewTransaction::new(test_date(), huge, "Salary", TransactionKind::Income);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::AmountTooLarge(huge))
        );
    }

    #[test]
    fn test_validate_rejects_blank_category() {
        let txn = NewTransaction::new(
            test_date(),
            Money::from_cents(100),
            "   ",
            TransactionKind::Income,
        );
        assert_eq!(txn.validate(), Err(TransactionValidationError::EmptyCategory));
    }

    #[test]
    fn test_blank_description_dropped() {
        let txn = NewTransaction::new(
            test_date(),
            Money::from_cents(100),
            "Food",
            TransactionKind::Expense,
        )
        .with_description("  ");
        assert_eq!(txn.description, None);
    }

    #[test]
    fn test_kind_filter() {
        assert!(KindFilter::All.matches(TransactionKind::Income));
        assert!(KindFilter::Expense.matches(TransactionKind::Expense));
        assert!(!KindFilter::Expense.matches(TransactionKind::Income));
        assert_eq!(KindFilter::Income.kind(), Some(TransactionKind::Income));
    }

    #[test]
    fn test_kind_round_trip_through_str() {
        for kind in [TransactionKind::Expense, TransactionKind::Income] {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_signed_amount() {
        let txn = Transaction {
            id: TransactionId::new(1),
            date: test_date(),
            amount: Money::from_cents(5000),
            category: "Food".into(),
            description: None,
            kind: TransactionKind::Expense,
            created_at: Utc::now(),
        };
        assert_eq!(txn.signed_amount(), Money::from_cents(-5000));
        assert_eq!(format!("{}", txn), "2025-01-15 Food expense 50.00");
    }
}
