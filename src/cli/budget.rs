//! Budget CLI commands

use clap::Args;

use super::{parse_amount, parse_month_or_current};
use crate::config::settings::Settings;
use crate::display::{format_budget_status, Theme};
use crate::error::TallyResult;
use crate::services::BudgetTracker;
use crate::storage::Storage;

#[derive(Debug, Args)]
pub struct SetBudgetArgs {
    /// Category name
    pub category: String,
    /// Monthly limit (e.g. "400" or "400.00")
    pub limit: String,
    /// Month (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,
}

#[derive(Debug, Args)]
pub struct BudgetStatusArgs {
    /// Month (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Handle `set-budget`
pub fn handle_set_budget(
    storage: &Storage,
    settings: &Settings,
    args: SetBudgetArgs,
) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let month = parse_month_or_current(args.month.as_deref())?;
    let limit = parse_amount(&args.limit)?;

    let budget = BudgetTracker::new(storage).set_budget(&args.category, limit, month)?;
    println!(
        "{} {} - {} for {}",
        theme.neutral("Budget set:"),
        budget.category,
        theme.money(budget.limit),
        budget.month
    );

    Ok(())
}

/// Handle `budget-status`
pub fn handle_budget_status(
    storage: &Storage,
    settings: &Settings,
    args: BudgetStatusArgs,
) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let month = parse_month_or_current(args.month.as_deref())?;

    let statuses = BudgetTracker::new(storage).status(month)?;
    if statuses.is_empty() {
        println!("{}", theme.warning(format!("No budgets set for {}", month)));
        return Ok(());
    }

    print!("{}", format_budget_status(month, &statuses, &theme));
    Ok(())
}
