//! Report CLI commands
//!
//! Summary, dashboard, statistics and the category listing.

use chrono::Local;
use clap::Args;

use super::parse_month_or_current;
use crate::config::settings::Settings;
use crate::display::{format_category_table, format_statistics, format_summary, Theme};
use crate::error::TallyResult;
use crate::reports::{Dashboard, MonthlySummary, Statistics};
use crate::services::Ledger;
use crate::storage::Storage;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Month (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Handle `summary`
pub fn handle_summary(storage: &Storage, settings: &Settings, args: SummaryArgs) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let month = parse_month_or_current(args.month.as_deref())?;

    let summary = MonthlySummary::generate(storage, month)?;
    if summary.is_empty() {
        println!("{}", theme.warning(format!("No transactions for {}", month)));
        return Ok(());
    }

    print!("{}", format_summary(&summary, &theme));
    Ok(())
}

/// Handle `dashboard`
pub fn handle_dashboard(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let today = Local::now().date_naive();
    let dashboard = Dashboard::generate(storage, today, settings.top_categories)?;

    print!("{}", dashboard.format_terminal(&Theme::from_settings(settings)));
    Ok(())
}

/// Handle `stats`
pub fn handle_stats(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let stats = Statistics::generate(storage, Local::now().date_naive())?;

    if stats.is_empty() {
        println!("{}", theme.warning("No transactions yet."));
        return Ok(());
    }

    print!("{}", format_statistics(&stats, &theme));
    Ok(())
}

/// Handle `categories`
pub fn handle_categories(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let categories = Ledger::new(storage).categories()?;

    if categories.is_empty() {
        println!("{}", theme.warning("No categories yet."));
        return Ok(());
    }

    println!("{}", theme.header("All categories"));
    print!("{}", format_category_table(&categories));
    Ok(())
}
