//! Budget tracking
//!
//! Stores per-category monthly limits and evaluates the month's expense
//! spending against them.

use crate::error::{TallyError, TallyResult};
use crate::models::{Budget, BudgetStatus, Money, Month, TransactionKind};
use crate::storage::{Storage, TransactionQuery};

/// Service for budget management
pub struct BudgetTracker<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetTracker<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the limit for a category in a month, replacing any previous limit
    pub fn set_budget(&self, category: &str, limit: Money, month: Month) -> TallyResult<Budget> {
        let category = category.trim();
        if category.is_empty() {
            return Err(TallyError::Validation("Category cannot be empty".into()));
        }
        if limit.is_negative() {
            return Err(TallyError::Validation(format!(
                "Budget limit cannot be negative (got {})",
                limit
            )));
        }
        if limit > Money::MAX_AMOUNT {
            return Err(TallyError::Validation(format!(
                "Budget limit cannot exceed {} (got {})",
                Money::MAX_AMOUNT,
                limit
            )));
        }

        let budget = self.storage.budgets().upsert(category, limit, month)?;
        tracing::info!(%category, %limit, %month, "set budget");

        Ok(budget)
    }

    /// Budgets of `month` evaluated against that month's expenses
    pub fn status(&self, month: Month) -> TallyResult<Vec<BudgetStatus>> {
        self.storage.snapshot(|storage| {
            let budgets = storage.budgets().list_for_month(month)?;
            let mut statuses = Vec::with_capacity(budgets.len());

            for budget in &budgets {
                let query = TransactionQuery::new()
                    .in_month(month)
                    .category(budget.category.clone())
                    .kind(TransactionKind::Expense);
                let spent = storage.transactions().sum(&query)?;
                statuses.push(BudgetStatus::evaluate(budget, spent));
            }

            Ok(statuses)
        })
    }

    /// Raw budget rows for `month`
    pub fn budgets(&self, month: Month) -> TallyResult<Vec<Budget>> {
        self.storage.budgets().list_for_month(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Band, NewTransaction};
    use chrono::NaiveDate;

    fn june() -> Month {
        Month::parse("2024-06").unwrap()
    }

    fn spend(storage: &Storage, y: i32, m: u32, d: u32, cents: i64, category: &str) {
        storage
            .transactions()
            .insert(&NewTransaction::new(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                Money::from_cents(cents),
                category,
                TransactionKind::Expense,
            ))
            .unwrap();
    }

    #[test]
    fn test_exceeded_budget() {
        let storage = Storage::open_in_memory().unwrap();
        let tracker = BudgetTracker::new(&storage);

        tracker.set_budget("Food", Money::from_cents(10000), june()).unwrap();
        spend(&storage, 2024, 6, 10, 12000, "Food");

        let status = tracker.status(june()).unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].spent, Money::from_cents(12000));
        assert_eq!(status[0].remaining, Money::from_cents(-2000));
        assert_eq!(status[0].band, Band::Exceeded);
    }

    #[test]
    fn test_status_only_counts_month_expenses() {
        let storage = Storage::open_in_memory().unwrap();
        let tracker = BudgetTracker::new(&storage);

        tracker.set_budget("Food", Money::from_cents(10000), june()).unwrap();
        spend(&storage, 2024, 5, 31, 9000, "Food");
        spend(&storage, 2024, 7, 1, 9000, "Food");
        spend(&storage, 2024, 6, 2, 3000, "Food");
        spend(&storage, 2024, 6, 3, 9000, "food");
        storage
            .transactions()
            .insert(&NewTransaction::new(
                NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
                Money::from_cents(50000),
                "Food",
                TransactionKind::Income,
            ))
            .unwrap();

        let status = tracker.status(june()).unwrap();
        assert_eq!(status[0].spent, Money::from_cents(3000));
        assert_eq!(status[0].band, Band::Healthy);
    }

    #[test]
    fn test_zero_limit_is_not_applicable() {
        let storage = Storage::open_in_memory().unwrap();
        let tracker = BudgetTracker::new(&storage);

        tracker.set_budget("Gifts", Money::zero(), june()).unwrap();

        let status = tracker.status(june()).unwrap();
        assert_eq!(status[0].percent, None);
        assert_eq!(status[0].band, Band::NotApplicable);
    }

    #[test]
    fn test_set_budget_twice_keeps_one_row() {
        let storage = Storage::open_in_memory().unwrap();
        let tracker = BudgetTracker::new(&storage);

        tracker.set_budget("Food", Money::from_cents(10000), june()).unwrap();
        tracker.set_budget("Food", Money::from_cents(20000), june()).unwrap();

        let budgets = tracker.budgets(june()).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].limit, Money::from_cents(20000));
    }

    #[test]
    fn test_set_budget_validation() {
        let storage = Storage::open_in_memory().unwrap();
        let tracker = BudgetTracker::new(&storage);

        assert!(tracker
            .set_budget("Food", Money::from_cents(-1), june())
            .unwrap_err()
            .is_validation());
        assert!(tracker
            .set_budget("Food", Money::from_cents(9_000_000_000_000_000_000), june())
            .unwrap_err()
            .is_validation());
        assert!(tracker
            .set_budget("  ", Money::from_cents(100), june())
            .unwrap_err()
            .is_validation());
        assert!(tracker.budgets(june()).unwrap().is_empty());
    }

    #[test]
    fn test_status_in_insertion_order() {
        let storage = Storage::open_in_memory().unwrap();
        let tracker = BudgetTracker::new(&storage);

        tracker.set_budget("Rent", Money::from_cents(100000), june()).unwrap();
        tracker.set_budget("Food", Money::from_cents(10000), june()).unwrap();

        let categories: Vec<_> = tracker
            .status(june())
            .unwrap()
            .into_iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(categories, vec!["Rent", "Food"]);
    }
}
