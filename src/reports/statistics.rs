//! Statistics report
//!
//! All-time counts and totals per transaction kind, plus a month-by-month
//! breakdown of the current and two preceding calendar months.

use chrono::NaiveDate;

use crate::error::TallyResult;
use crate::models::{Money, Month, TransactionKind};
use crate::storage::{KindTotal, Storage, TransactionQuery};

/// Number of calendar months in the recent breakdown, current month included
const RECENT_MONTHS: usize = 3;

/// Expense and income totals of one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotals {
    pub month: Month,
    pub expense: Money,
    pub income: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// One entry per kind that has transactions, expense first
    pub all_time: Vec<KindTotal>,
    /// First month of the recent window
    pub since: Month,
    /// Months in the window that have transactions, newest first
    pub recent: Vec<MonthTotals>,
}

impl Statistics {
    /// Generate statistics as of `today`
    pub fn generate(storage: &Storage, today: NaiveDate) -> TallyResult<Self> {
        let current = Month::of(today);
        let mut since = current;
        for _ in 1..RECENT_MONTHS {
            since = since.prev();
        }

        storage.snapshot(|storage| {
            let repo = storage.transactions();
            let all_time = repo.totals_by_kind(&TransactionQuery::new())?;
            let window =
                TransactionQuery::new().between(since.start_date(), current.end_date_exclusive());
            let rows = repo.totals_by_month_and_kind(&window)?;

            let mut recent: Vec<MonthTotals> = Vec::new();
            for row in rows {
                let index = match recent.iter().position(|m| m.month == row.month) {
                    Some(index) => index,
                    None => {
                        recent.push(MonthTotals {
                            month: row.month,
                            expense: Money::zero(),
                            income: Money::zero(),
                        });
                        recent.len() - 1
                    }
                };
                match row.kind {
                    TransactionKind::Expense => recent[index].expense = row.total,
                    TransactionKind::Income => recent[index].income = row.total,
                }
            }

            Ok(Self {
                all_time,
                since,
                recent,
            })
        })
    }

    /// All-time figures for `kind`, if any transaction of that kind exists
    pub fn for_kind(&self, kind: TransactionKind) -> Option<&KindTotal> {
        self.all_time.iter().find(|t| t.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.all_time.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;

    fn add(storage: &Storage, y: i32, m: u32, d: u32, cents: i64, kind: TransactionKind) {
        storage
            .transactions()
            .insert(&NewTransaction::new(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                Money::from_cents(cents),
                "Misc",
                kind,
            ))
            .unwrap();
    }

    #[test]
    fn test_all_time_totals() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 2020, 1, 1, 100, TransactionKind::Expense);
        add(&storage, 2024, 6, 1, 250, TransactionKind::Expense);
        add(&storage, 2024, 6, 2, 1000, TransactionKind::Income);

        let stats =
            Statistics::generate(&storage, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();

        let expense = stats.for_kind(TransactionKind::Expense).unwrap();
        assert_eq!(expense.count, 2);
        assert_eq!(expense.total, Money::from_cents(350));
        assert_eq!(stats.for_kind(TransactionKind::Income).unwrap().count, 1);
    }

    #[test]
    fn test_recent_window_spans_three_calendar_months() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 2024, 3, 31, 999, TransactionKind::Expense);
        add(&storage, 2024, 4, 1, 100, TransactionKind::Expense);
        add(&storage, 2024, 6, 10, 300, TransactionKind::Expense);
        add(&storage, 2024, 6, 11, 700, TransactionKind::Income);

        let stats =
            Statistics::generate(&storage, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();

        assert_eq!(stats.since, Month::parse("2024-04").unwrap());
        assert_eq!(
            stats.recent,
            vec![
                MonthTotals {
                    month: Month::parse("2024-06").unwrap(),
                    expense: Money::from_cents(300),
                    income: Money::from_cents(700),
                },
                MonthTotals {
                    month: Month::parse("2024-04").unwrap(),
                    expense: Money::from_cents(100),
                    income: Money::zero(),
                },
            ]
        );
    }

    #[test]
    fn test_recent_window_excludes_later_months() {
        let storage = Storage::open_in_memory().unwrap();
        add(&storage, 2024, 3, 31, 1, TransactionKind::Expense);
        add(&storage, 2024, 4, 30, 20, TransactionKind::Expense);
        add(&storage, 2024, 6, 30, 300, TransactionKind::Income);
        add(&storage, 2024, 7, 1, 4000, TransactionKind::Expense);
        add(&storage, 2024, 8, 1, 50000, TransactionKind::Income);

        let stats =
            Statistics::generate(&storage, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()).unwrap();

        let months: Vec<String> = stats.recent.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2024-06", "2024-04"]);
        assert_eq!(stats.recent[0].income, Money::from_cents(300));
        assert_eq!(stats.recent[1].expense, Money::from_cents(20));

        // all-time figures still cover every row
        let expense = stats.for_kind(TransactionKind::Expense).unwrap();
        assert_eq!(expense.count, 3);
        assert_eq!(expense.total, Money::from_cents(4021));
        assert_eq!(
            stats.for_kind(TransactionKind::Income).unwrap().total,
            Money::from_cents(50300)
        );
    }

    #[test]
    fn test_empty_ledger() {
        let storage = Storage::open_in_memory().unwrap();
        let stats =
            Statistics::generate(&storage, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap();

        assert!(stats.is_empty());
        assert!(stats.recent.is_empty());
        assert_eq!(stats.since, Month::parse("2023-11").unwrap());
    }
}
