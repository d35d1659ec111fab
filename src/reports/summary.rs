//! Monthly summary report
//!
//! Rolls a month's transactions up per category into expense, income and
//! net figures.

use std::collections::BTreeMap;

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, Month, TransactionKind};
use crate::storage::{Storage, TransactionQuery};

/// Totals for one category within the month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: String,
    pub expense: Money,
    pub income: Money,
}

impl CategorySummary {
    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Per-category roll-up of one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: Month,
    /// Categories with at least one transaction, in lexicographic order
    pub categories: Vec<CategorySummary>,
    pub total_expense: Money,
    pub total_income: Money,
}

impl MonthlySummary {
    /// Generate the summary for `month`
    pub fn generate(storage: &Storage, month: Month) -> TallyResult<Self> {
        let rows = storage
            .transactions()
            .totals_by_category_and_kind(&TransactionQuery::new().in_month(month))?;

        let mut by_category: BTreeMap<String, CategorySummary> = BTreeMap::new();
        for row in rows {
            let entry = by_category
                .entry(row.category.clone())
                .or_insert_with(|| CategorySummary {
                    category: row.category,
                    ..Default::default()
                });
            match row.kind {
                TransactionKind::Expense => entry.expense += row.total,
                TransactionKind::Income => entry.income += row.total,
            }
        }

        let categories: Vec<CategorySummary> = by_category.into_values().collect();
        let out_of_range = || {
            TallyError::Validation(format!(
                "Totals for {} exceed the supported amount range",
                month
            ))
        };
        let total_expense =
            Money::checked_sum(categories.iter().map(|c| c.expense)).ok_or_else(out_of_range)?;
        let total_income =
            Money::checked_sum(categories.iter().map(|c| c.income)).ok_or_else(out_of_range)?;

        Ok(Self {
            month,
            categories,
            total_expense,
            total_income,
        })
    }

    /// Total income minus total expense
    pub fn net(&self) -> Money {
        self.total_income - self.total_expense
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use chrono::NaiveDate;

    fn add(storage: &Storage, d: u32, cents: i64, category: &str, kind: TransactionKind) {
        storage
            .transactions()
            .insert(&NewTransaction::new(
                NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
                Money::from_cents(cents),
                category,
                kind,
            ))
            .unwrap();
    }

    #[test]
    fn test_summary_per_category() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 1, 5000, "Food", TransactionKind::Expense);
        add(&storage, 2, 2500, "Food", TransactionKind::Expense);
        add(&storage, 3, 1000, "Food", TransactionKind::Income);
        add(&storage, 4, 200000, "Salary", TransactionKind::Income);
        add(&storage, 5, 90000, "Rent", TransactionKind::Expense);

        let summary = MonthlySummary::generate(&storage, Month::parse("2024-06").unwrap()).unwrap();

        let names: Vec<_> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Rent", "Salary"]);

        let food = &summary.categories[0];
        assert_eq!(food.expense, Money::from_cents(7500));
        assert_eq!(food.income, Money::from_cents(1000));
        assert_eq!(food.net(), Money::from_cents(-6500));

        assert_eq!(summary.total_expense, Money::from_cents(97500));
        assert_eq!(summary.total_income, Money::from_cents(201000));
        assert_eq!(
            summary.net(),
            summary.categories.iter().map(CategorySummary::net).sum::<Money>()
        );
    }

    #[test]
    fn test_summary_excludes_other_months() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 30, 100, "Food", TransactionKind::Expense);

        let summary = MonthlySummary::generate(&storage, Month::parse("2024-07").unwrap()).unwrap();
        assert!(summary.is_empty());
        assert!(summary.net().is_zero());
    }

    #[test]
    fn test_large_totals() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 1, Money::MAX_AMOUNT.cents(), "Rent", TransactionKind::Expense);
        add(&storage, 2, Money::MAX_AMOUNT.cents(), "Tax", TransactionKind::Expense);

        let summary = MonthlySummary::generate(&storage, Month::parse("2024-06").unwrap()).unwrap();
        assert_eq!(summary.total_expense, Money::from_cents(20_000_000_000_000));
        assert_eq!(summary.net(), Money::from_cents(-20_000_000_000_000));
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 1, 9_000_000_000_000_000_000, "Rent", TransactionKind::Expense);
        add(&storage, 2, 9_000_000_000_000_000_000, "Tax", TransactionKind::Expense);

        let err = MonthlySummary::generate(&storage, Month::parse("2024-06").unwrap()).unwrap_err();
        assert!(err.is_validation());
    }
}
