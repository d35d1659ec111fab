//! Transaction repository backed by the `transactions` table.
//!
//! Every read orders rows newest date first, breaking ties by insertion order.
//! Month scoping is always a half-open date range, never a string prefix match.

use chrono::{NaiveDate, Utc};
use rusqlite::{params_from_iter, types::Value, Connection, OptionalExtension};

use crate::error::TallyResult;
use crate::models::{
    KindFilter, Money, Month, NewTransaction, Transaction, TransactionId, TransactionKind,
};

use super::schema::{MapRow, TRANSACTION_COLUMNS};

/// Storage-level filter. All conditions are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Inclusive lower date bound
    pub since: Option<NaiveDate>,
    /// Exclusive upper date bound
    pub until: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to `[month start, next month start)`
    pub fn in_month(mut self, month: Month) -> Self {
        self.since = Some(month.start_date());
        self.until = Some(month.end_date_exclusive());
        self
    }

    /// Restrict to `[start, until)`
    pub fn between(mut self, start: NaiveDate, until: NaiveDate) -> Self {
        self.since = Some(start);
        self.until = Some(until);
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn kind_filter(mut self, filter: KindFilter) -> Self {
        self.kind = filter.kind();
        self
    }

    /// Render the conditions as a `WHERE` clause plus positional parameters
    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut parts = Vec::new();
        let mut params = Vec::new();

        if let Some(since) = self.since {
            params.push(Value::Text(since.to_string()));
            parts.push(format!("date >= ?{}", params.len()));
        }
        if let Some(until) = self.until {
            params.push(Value::Text(until.to_string()));
            parts.push(format!("date < ?{}", params.len()));
        }
        if let Some(category) = &self.category {
            params.push(Value::Text(category.clone()));
            parts.push(format!("category = ?{}", params.len()));
        }
        if let Some(kind) = self.kind {
            params.push(Value::Text(kind.as_str().to_string()));
            parts.push(format!("kind = ?{}", params.len()));
        }

        if parts.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", parts.join(" AND ")), params)
        }
    }
}

/// Number of transactions recorded under a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Count and sum of one kind of transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTotal {
    pub kind: TransactionKind,
    pub count: usize,
    pub total: Money,
}

/// Sum of one kind of transaction within one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKindTotal {
    pub category: String,
    pub kind: TransactionKind,
    pub total: Money,
}

/// Sum of one kind of transaction within one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthKindTotal {
    pub month: Month,
    pub kind: TransactionKind,
    pub total: Money,
}

/// Repository for transaction persistence and roll-up queries
pub struct TransactionRepository<'a> {
    connection: &'a Connection,
}

impl<'a> TransactionRepository<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    /// Insert a transaction and return it with its assigned id
    pub fn insert(&self, new: &NewTransaction) -> TallyResult<Transaction> {
        let transaction = self
            .connection
            .prepare(&format!(
                "INSERT INTO transactions (date, amount_cents, category, description, kind, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    new.date,
                    new.amount,
                    &new.category,
                    &new.description,
                    new.kind,
                    Utc::now(),
                ),
                Transaction::map_row,
            )?;

        Ok(transaction)
    }

    /// Get a transaction by id
    pub fn get(&self, id: TransactionId) -> TallyResult<Option<Transaction>> {
        let transaction = self
            .connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"
            ))?
            .query_row([id], Transaction::map_row)
            .optional()?;

        Ok(transaction)
    }

    /// Delete a transaction, returning whether a row was removed
    pub fn delete(&self, id: TransactionId) -> TallyResult<bool> {
        let removed = self
            .connection
            .execute("DELETE FROM transactions WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    /// Fetch transactions matching `query`, newest first
    pub fn find(&self, query: &TransactionQuery) -> TallyResult<Vec<Transaction>> {
        let (where_clause, params) = query.where_clause();
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions{where_clause} ORDER BY date DESC, id ASC"
        );
        tracing::debug!(%sql, "querying transactions");

        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), Transaction::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Transactions whose description or category contains `text`
    ///
    /// Matching is case-sensitive (`instr`, unlike `LIKE`).
    pub fn search(&self, text: &str, kind: KindFilter) -> TallyResult<Vec<Transaction>> {
        let mut sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE (instr(description, ?1) > 0 OR instr(category, ?1) > 0)"
        );
        let mut params = vec![Value::Text(text.to_string())];

        if let Some(kind) = kind.kind() {
            params.push(Value::Text(kind.as_str().to_string()));
            sql.push_str(" AND kind = ?2");
        }
        sql.push_str(" ORDER BY date DESC, id ASC");

        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), Transaction::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Sum of amounts matching `query` (zero when nothing matches)
    pub fn sum(&self, query: &TransactionQuery) -> TallyResult<Money> {
        let (where_clause, params) = query.where_clause();
        let total = self.connection.query_row(
            &format!("SELECT COALESCE(SUM(amount_cents), 0) FROM transactions{where_clause}"),
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Distinct categories with their transaction counts, most used first
    pub fn category_counts(&self) -> TallyResult<Vec<CategoryCount>> {
        let mut statement = self.connection.prepare(
            "SELECT category, COUNT(*) AS count FROM transactions
             GROUP BY category ORDER BY count DESC, category ASC",
        )?;
        let rows = statement
            .query_map([], |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get::<_, i64>(1)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count and total per kind for rows matching `query`
    pub fn totals_by_kind(&self, query: &TransactionQuery) -> TallyResult<Vec<KindTotal>> {
        let (where_clause, params) = query.where_clause();
        let mut statement = self.connection.prepare(&format!(
            "SELECT kind, COUNT(*), SUM(amount_cents) FROM transactions{where_clause}
             GROUP BY kind ORDER BY kind"
        ))?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(KindTotal {
                    kind: row.get(0)?,
                    count: row.get::<_, i64>(1)? as usize,
                    total: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Totals grouped by (category, kind), ordered by category then kind
    pub fn totals_by_category_and_kind(
        &self,
        query: &TransactionQuery,
    ) -> TallyResult<Vec<CategoryKindTotal>> {
        let (where_clause, params) = query.where_clause();
        let mut statement = self.connection.prepare(&format!(
            "SELECT category, kind, SUM(amount_cents) FROM transactions{where_clause}
             GROUP BY category, kind ORDER BY category ASC, kind ASC"
        ))?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(CategoryKindTotal {
                    category: row.get(0)?,
                    kind: row.get(1)?,
                    total: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Categories ranked by total amount, largest first, at most `limit` rows
    pub fn top_categories(
        &self,
        query: &TransactionQuery,
        limit: usize,
    ) -> TallyResult<Vec<(String, Money)>> {
        let (where_clause, params) = query.where_clause();
        let mut statement = self.connection.prepare(&format!(
            "SELECT category, SUM(amount_cents) AS total FROM transactions{where_clause}
             GROUP BY category ORDER BY total DESC, category ASC LIMIT {limit}"
        ))?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Totals grouped by (calendar month, kind), newest month first
    pub fn totals_by_month_and_kind(
        &self,
        query: &TransactionQuery,
    ) -> TallyResult<Vec<MonthKindTotal>> {
        let (where_clause, params) = query.where_clause();
        let mut statement = self.connection.prepare(&format!(
            "SELECT strftime('%Y-%m', date) AS month, kind, SUM(amount_cents)
             FROM transactions{where_clause}
             GROUP BY month, kind ORDER BY month DESC, kind ASC"
        ))?;
        let rows = statement
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(MonthKindTotal {
                    month: row.get(0)?,
                    kind: row.get(1)?,
                    total: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count transactions
    pub fn count(&self) -> TallyResult<usize> {
        let count: i64 =
            self.connection
                .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(
        storage: &Storage,
        day: NaiveDate,
        cents: i64,
        category: &str,
        kind: TransactionKind,
    ) -> Transaction {
        storage
            .transactions()
            .insert(&NewTransaction::new(day, Money::from_cents(cents), category, kind))
            .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let storage = Storage::open_in_memory().unwrap();
        let new = NewTransaction::new(
            date(2025, 1, 15),
            Money::from_cents(5000),
            "Food",
            TransactionKind::Expense,
        )
        .with_description("lunch");

        let stored = storage.transactions().insert(&new).unwrap();
        let retrieved = storage.transactions().get(stored.id).unwrap().unwrap();

        assert_eq!(retrieved, stored);
        assert_eq!(retrieved.amount.cents(), 5000);
        assert_eq!(retrieved.description.as_deref(), Some("lunch"));
        assert_eq!(retrieved.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let storage = Storage::open_in_memory().unwrap();
        let first = add(&storage, date(2025, 1, 1), 100, "A", TransactionKind::Expense);
        storage.transactions().delete(first.id).unwrap();
        let second = add(&storage, date(2025, 1, 1), 100, "A", TransactionKind::Expense);

        assert!(second.id > first.id);
    }

    #[test]
    fn test_delete() {
        let storage = Storage::open_in_memory().unwrap();
        let txn = add(&storage, date(2025, 1, 1), 100, "A", TransactionKind::Expense);

        assert!(storage.transactions().delete(txn.id).unwrap());
        assert!(!storage.transactions().delete(txn.id).unwrap());
        assert_eq!(storage.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_find_orders_newest_first_then_insertion() {
        let storage = Storage::open_in_memory().unwrap();
        let a = add(&storage, date(2025, 1, 10), 100, "A", TransactionKind::Expense);
        let b = add(&storage, date(2025, 1, 20), 200, "B", TransactionKind::Expense);
        let c = add(&storage, date(2025, 1, 10), 300, "C", TransactionKind::Income);

        let ids: Vec<_> = storage
            .transactions()
            .find(&TransactionQuery::new())
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec![b.id, a.id, c.id]);
    }

    #[test]
    fn test_month_range_is_half_open() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, date(2024, 5, 31), 100, "Food", TransactionKind::Expense);
        add(&storage, date(2024, 6, 1), 200, "Food", TransactionKind::Expense);
        add(&storage, date(2024, 6, 30), 300, "Food", TransactionKind::Expense);
        add(&storage, date(2024, 7, 1), 400, "Food", TransactionKind::Expense);

        let query = TransactionQuery::new().in_month(Month::parse("2024-06").unwrap());
        let rows = storage.transactions().find(&query).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(storage.transactions().sum(&query).unwrap().cents(), 500);
    }

    #[test]
    fn test_category_and_kind_filters() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, date(2025, 1, 1), 100, "Food", TransactionKind::Expense);
        add(&storage, date(2025, 1, 2), 200, "food", TransactionKind::Expense);
        add(&storage, date(2025, 1, 3), 300, "Food", TransactionKind::Income);

        let query = TransactionQuery::new()
            .category("Food")
            .kind(TransactionKind::Expense);
        let rows = storage.transactions().find(&query).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount.cents(), 100);
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .transactions()
            .insert(
                &NewTransaction::new(
                    date(2025, 1, 1),
                    Money::from_cents(100),
                    "Food",
                    TransactionKind::Expense,
                )
                .with_description("Coffee beans"),
            )
            .unwrap();
        add(&storage, date(2025, 1, 2), 200, "Coffee Shop", TransactionKind::Expense);
        add(&storage, date(2025, 1, 3), 300, "Salary", TransactionKind::Income);

        let repo = storage.transactions();
        assert_eq!(repo.search("Coffee", KindFilter::All).unwrap().len(), 2);
        assert_eq!(repo.search("coffee", KindFilter::All).unwrap().len(), 0);
        assert_eq!(repo.search("Sal", KindFilter::Expense).unwrap().len(), 0);
        assert_eq!(repo.search("Sal", KindFilter::Income).unwrap().len(), 1);
    }

    #[test]
    fn test_category_counts() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, date(2025, 1, 1), 100, "Rent", TransactionKind::Expense);
        add(&storage, date(2025, 1, 1), 100, "Food", TransactionKind::Expense);
        add(&storage, date(2025, 1, 2), 100, "Food", TransactionKind::Expense);

        let counts = storage.transactions().category_counts().unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount { category: "Food".into(), count: 2 },
                CategoryCount { category: "Rent".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let storage = Storage::open_in_memory().unwrap();
        let total = storage
            .transactions()
            .sum(&TransactionQuery::new().category("Nope"))
            .unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_totals_by_month_and_kind() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, date(2025, 1, 5), 100, "A", TransactionKind::Expense);
        add(&storage, date(2025, 1, 6), 150, "B", TransactionKind::Expense);
        add(&storage, date(2025, 2, 1), 900, "C", TransactionKind::Income);

        let rows = storage
            .transactions()
            .totals_by_month_and_kind(&TransactionQuery::new())
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month.to_string(), "2025-02");
        assert_eq!(rows[0].kind, TransactionKind::Income);
        assert_eq!(rows[1].total.cents(), 250);
    }
}
