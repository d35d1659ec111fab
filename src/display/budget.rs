//! Budget status display

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use super::Theme;
use crate::models::{BudgetStatus, Month};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    band: String,
}

/// Format evaluated budgets as a table, followed by one line per exceeded budget
pub fn format_budget_status(month: Month, statuses: &[BudgetStatus], theme: &Theme) -> String {
    let rows = statuses.iter().map(|s| {
        let used = match s.percent {
            Some(percent) => format!("{:.1}%", percent),
            None => "N/A".to_string(),
        };
        BudgetRow {
            category: s.category.clone(),
            limit: theme.money(s.limit),
            spent: theme.money(s.spent),
            remaining: theme.band(theme.money(s.remaining), s.band),
            used: theme.band(used, s.band),
            band: theme.band(s.band.to_string(), s.band),
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..5), Alignment::right());

    let mut output = format!("{}\n{}\n", theme.header(format!("Budget Status - {}", month)), table);

    for status in statuses.iter().filter(|s| s.is_exceeded()) {
        output.push_str(&theme.error(format!(
            "{} budget exceeded by {}",
            status.category,
            theme.money(status.remaining.abs())
        )));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetId, Money};

    fn status(category: &str, limit: i64, spent: i64) -> BudgetStatus {
        BudgetStatus::evaluate(
            &Budget {
                id: BudgetId::new(1),
                category: category.into(),
                limit: Money::from_cents(limit),
                month: Month::parse("2024-06").unwrap(),
            },
            Money::from_cents(spent),
        )
    }

    #[test]
    fn test_exceeded_budget_is_reported() {
        let output = format_budget_status(
            Month::parse("2024-06").unwrap(),
            &[status("Food", 10000, 12000), status("Rent", 100000, 1000)],
            &Theme::plain(),
        );

        assert!(output.contains("Budget Status - 2024-06"));
        assert!(output.contains("-$20.00"));
        assert!(output.contains("120.0%"));
        assert!(output.contains("Food budget exceeded by $20.00"));
        assert!(!output.contains("Rent budget exceeded"));
    }

    #[test]
    fn test_zero_limit_shows_not_applicable() {
        let output = format_budget_status(
            Month::parse("2024-06").unwrap(),
            &[status("Gifts", 0, 0)],
            &Theme::plain(),
        );
        assert!(output.contains("N/A"));
    }
}
