//! Dashboard report
//!
//! At-a-glance view of the current month: spending, income, the trailing
//! week's spending and the biggest expense categories.

use chrono::{Days, NaiveDate};

use crate::display::Theme;
use crate::error::TallyResult;
use crate::models::{Money, Month, TransactionKind};
use crate::storage::{Storage, TransactionQuery};

/// Number of top expense categories shown by default
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Window for the trailing spending figure
const TRAILING_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub month: Month,
    pub month_expense: Money,
    pub month_income: Money,
    /// Expenses dated on or after `today - 7 days`
    pub trailing_expense: Money,
    /// Largest expense categories this month, ties broken by name
    pub top_categories: Vec<(String, Money)>,
}

impl Dashboard {
    /// Generate the dashboard as of `today`
    pub fn generate(storage: &Storage, today: NaiveDate, top: usize) -> TallyResult<Self> {
        let month = Month::of(today);
        let in_month = TransactionQuery::new().in_month(month);
        let week_start = today
            .checked_sub_days(Days::new(TRAILING_DAYS))
            .unwrap_or(NaiveDate::MIN);

        storage.snapshot(|storage| {
            let repo = storage.transactions();

            let mut month_expense = Money::zero();
            let mut month_income = Money::zero();
            for total in repo.totals_by_kind(&in_month)? {
                match total.kind {
                    TransactionKind::Expense => month_expense = total.total,
                    TransactionKind::Income => month_income = total.total,
                }
            }

            let trailing_expense = repo.sum(
                &TransactionQuery::new()
                    .since(week_start)
                    .kind(TransactionKind::Expense),
            )?;
            let top_categories =
                repo.top_categories(&in_month.clone().kind(TransactionKind::Expense), top)?;

            Ok(Self {
                today,
                month,
                month_expense,
                month_income,
                trailing_expense,
                top_categories,
            })
        })
    }

    /// Month income minus month expense
    pub fn net(&self) -> Money {
        self.month_income - self.month_expense
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, theme: &Theme) -> String {
        let line = |label: &str, value: String| format!("{:<24} {}\n", label, value);
        let amount = |value: Money| format!("{:>15}", theme.money(value));

        let mut output = String::new();

        output.push_str(&theme.header(format!("Dashboard for {}", self.month)));
        output.push('\n');
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&line(
            "This month spent:",
            theme.kind(amount(self.month_expense), TransactionKind::Expense),
        ));
        output.push_str(&line(
            "This month income:",
            theme.kind(amount(self.month_income), TransactionKind::Income),
        ));
        let net = self.net();
        let net_text = if net.is_negative() {
            theme.error(amount(net))
        } else {
            theme.success(amount(net))
        };
        output.push_str(&line("Net:", net_text));
        output.push_str(&line(
            "Last 7 days spending:",
            theme.warning(amount(self.trailing_expense)),
        ));

        if !self.top_categories.is_empty() {
            output.push('\n');
            output.push_str(&theme.header("Top spending categories this month"));
            output.push('\n');
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for (category, total) in &self.top_categories {
                output.push_str(&format!(
                    "  {:<22} {}\n",
                    category,
                    theme.neutral(amount(*total))
                ));
            }
        }

        output
    }
}
