//! Report display formatting
//!
//! Table views of the monthly summary and statistics reports.

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use super::Theme;
use crate::models::{Money, TransactionKind};
use crate::reports::{MonthlySummary, Statistics};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Expenses")]
    expense: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Blank amounts are shown as `-`
fn amount_or_dash(amount: Money, theme: &Theme) -> String {
    if amount.is_zero() {
        "-".to_string()
    } else {
        theme.money(amount)
    }
}

/// Format the monthly summary table with month totals
pub fn format_summary(summary: &MonthlySummary, theme: &Theme) -> String {
    let rows = summary.categories.iter().map(|c| SummaryRow {
        category: c.category.clone(),
        expense: theme.kind(amount_or_dash(c.expense, theme), TransactionKind::Expense),
        income: theme.kind(amount_or_dash(c.income, theme), TransactionKind::Income),
        net: theme.neutral(amount_or_dash(c.net(), theme)),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());

    let mut output = format!(
        "{}\n{}\n\n",
        theme.header(format!("Monthly Summary - {}", summary.month)),
        table
    );
    output.push_str(&theme.header("Month Total:"));
    output.push('\n');
    output.push_str(&format!(
        "  {}\n",
        theme.kind(
            format!("Expenses: {}", theme.money(summary.total_expense)),
            TransactionKind::Expense
        )
    ));
    output.push_str(&format!(
        "  {}\n",
        theme.kind(
            format!("Income:   {}", theme.money(summary.total_income)),
            TransactionKind::Income
        )
    ));
    output.push_str(&format!(
        "  {}\n",
        theme.neutral(format!("Net:      {}", theme.money(summary.net())))
    ));

    output
}

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Income")]
    income: String,
}

/// Format all-time and recent-month statistics
pub fn format_statistics(stats: &Statistics, theme: &Theme) -> String {
    let kinds = stats.all_time.iter().map(|t| KindRow {
        kind: match t.kind {
            TransactionKind::Expense => "Expense".to_string(),
            TransactionKind::Income => "Income".to_string(),
        },
        count: t.count,
        total: theme.kind(theme.money(t.total), t.kind),
    });

    let mut all_time = Table::new(kinds);
    all_time
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());

    let mut output = format!("{}\n{}\n", theme.header("All-Time Statistics"), all_time);

    if !stats.recent.is_empty() {
        let months = stats.recent.iter().map(|m| MonthRow {
            month: theme.neutral(m.month.to_string()),
            expense: theme.kind(theme.money(m.expense), TransactionKind::Expense),
            income: theme.kind(theme.money(m.income), TransactionKind::Income),
        });

        let mut recent = Table::new(months);
        recent
            .with(Style::rounded())
            .modify(Columns::new(1..), Alignment::right());

        output.push_str(&format!(
            "\n{}\n{}\n",
            theme.header(format!("Since {}", stats.since)),
            recent
        ));
    }

    output
}
