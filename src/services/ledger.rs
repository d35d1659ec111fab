//! Ledger service
//!
//! Owns the transaction records: adding, filtering, searching and deleting
//! them. Reporting code reads through the storage layer and never mutates.

use chrono::{Days, Local, NaiveDate};

use crate::error::{TallyError, TallyResult};
use crate::models::{KindFilter, Month, NewTransaction, Transaction, TransactionId};
use crate::storage::{CategoryCount, Storage, TransactionQuery};

/// Options for filtering listed transactions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only transactions dated within the last N days (ignored when `month` is set)
    pub since_days: Option<u32>,
    /// Only transactions inside this calendar month
    pub month: Option<Month>,
    /// Exact category match
    pub category: Option<String>,
    pub kind: KindFilter,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since_days(mut self, days: u32) -> Self {
        self.since_days = Some(days);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }
}

/// Service for transaction management
pub struct Ledger<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

impl<'a> Ledger<'a> {
    /// Create a ledger anchored to the local calendar date
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, Local::now().date_naive())
    }

    /// Create a ledger with an explicit "today" for relative filters
    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Record a new transaction
    pub fn add(&self, mut new: NewTransaction) -> TallyResult<Transaction> {
        new.category = new.category.trim().to_string();
        new.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        let transaction = self.storage.transactions().insert(&new)?;
        tracing::info!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            category = %transaction.category,
            "added transaction"
        );

        Ok(transaction)
    }

    /// List transactions matching `filter`, newest first
    pub fn query(&self, filter: &TransactionFilter) -> TallyResult<Vec<Transaction>> {
        let mut query = TransactionQuery::new().kind_filter(filter.kind);

        if let Some(month) = filter.month {
            query = query.in_month(month);
        } else if let Some(days) = filter.since_days {
            let since = self
                .today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN);
            query = query.since(since);
        }

        if let Some(category) = &filter.category {
            query = query.category(category.clone());
        }

        self.storage.transactions().find(&query)
    }

    /// Transactions whose description or category contains `text`
    pub fn search(&self, text: &str, kind: KindFilter) -> TallyResult<Vec<Transaction>> {
        self.storage.transactions().search(text, kind)
    }

    pub fn find(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        self.storage.transactions().get(id)
    }

    /// Delete a transaction, returning the removed record
    pub fn delete(&self, id: TransactionId) -> TallyResult<Transaction> {
        let transaction = self
            .find(id)?
            .ok_or_else(|| TallyError::transaction_not_found(id.to_string()))?;

        if !self.storage.transactions().delete(id)? {
            return Err(TallyError::transaction_not_found(id.to_string()));
        }
        tracing::info!(id = %id, "deleted transaction");

        Ok(transaction)
    }

    /// Distinct categories with their usage counts, most used first
    pub fn categories(&self) -> TallyResult<Vec<CategoryCount>> {
        self.storage.transactions().category_counts()
    }

    pub fn count(&self) -> TallyResult<usize> {
        self.storage.transactions().count()
    }
}
