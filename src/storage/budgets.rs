//! Budget repository backed by the `budgets` table.

use rusqlite::Connection;

use crate::error::TallyResult;
use crate::models::{Budget, Money, Month};

use super::schema::{MapRow, BUDGET_COLUMNS};

/// Repository for per-category monthly limits
pub struct BudgetRepository<'a> {
    connection: &'a Connection,
}

impl<'a> BudgetRepository<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    /// Insert or replace the limit for `(category, month)`
    ///
    /// An existing row keeps its id, so listing order is the order in which
    /// the pair was first budgeted.
    pub fn upsert(&self, category: &str, limit: Money, month: Month) -> TallyResult<Budget> {
        let budget = self
            .connection
            .prepare(&format!(
                "INSERT INTO budgets (category, limit_cents, month) VALUES (?1, ?2, ?3)
                 ON CONFLICT (category, month) DO UPDATE SET limit_cents = excluded.limit_cents
                 RETURNING {BUDGET_COLUMNS}"
            ))?
            .query_row((category, limit, month), Budget::map_row)?;

        Ok(budget)
    }

    /// Budgets for `month`, in the order they were created
    pub fn list_for_month(&self, month: Month) -> TallyResult<Vec<Budget>> {
        let mut statement = self.connection.prepare(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE month = ?1 ORDER BY id ASC"
        ))?;
        let budgets = statement
            .query_map([month], Budget::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    /// Count budget rows across all months
    pub fn count(&self) -> TallyResult<usize> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Money, Month};
    use crate::storage::Storage;

    fn june() -> Month {
        Month::parse("2024-06").unwrap()
    }

    #[test]
    fn test_upsert_inserts() {
        let storage = Storage::open_in_memory().unwrap();
        let budget = storage
            .budgets()
            .upsert("Food", Money::from_cents(10000), june())
            .unwrap();

        assert_eq!(budget.category, "Food");
        assert_eq!(budget.limit.cents(), 10000);
        assert_eq!(budget.month, june());
    }

    #[test]
    fn test_upsert_replaces_limit_and_keeps_row() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        let first = repo.upsert("Food", Money::from_cents(10000), june()).unwrap();
        let second = repo.upsert("Food", Money::from_cents(25000), june()).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            repo.list_for_month(june()).unwrap()[0].limit,
            Money::from_cents(25000)
        );
    }

    #[test]
    fn test_list_for_month_is_scoped_and_ordered() {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.budgets();
        repo.upsert("Rent", Money::from_cents(100000), june()).unwrap();
        repo.upsert("Food", Money::from_cents(10000), june()).unwrap();
        repo.upsert("Food", Money::from_cents(10000), june().next()).unwrap();

        let categories: Vec<_> = repo
            .list_for_month(june())
            .unwrap()
            .into_iter()
            .map(|b| b.category)
            .collect();

        assert_eq!(categories, vec!["Rent", "Food"]);
    }

    #[test]
    fn test_zero_limit_allowed() {
        let storage = Storage::open_in_memory().unwrap();
        let budget = storage
            .budgets()
            .upsert("Gifts", Money::zero(), june())
            .unwrap();
        assert!(budget.limit.is_zero());
    }
}
