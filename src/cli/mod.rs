//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service and report layers.

pub mod budget;
pub mod export;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_status, handle_set_budget, BudgetStatusArgs, SetBudgetArgs};
pub use export::{handle_export, ExportArgs};
pub use report::{handle_categories, handle_dashboard, handle_stats, handle_summary, SummaryArgs};
pub use transaction::{
    handle_add, handle_delete, handle_list, handle_search, AddArgs, DeleteArgs, ListArgs,
    SearchArgs,
};

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, Month};

/// Parse a user-supplied amount such as `12.50` or `$1,200`
pub fn parse_amount(input: &str) -> TallyResult<Money> {
    Money::parse(input).map_err(|e| TallyError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM` month, defaulting to the current month when absent
pub fn parse_month_or_current(input: Option<&str>) -> TallyResult<Month> {
    match input {
        Some(text) => parse_month(text),
        None => Ok(Month::current()),
    }
}

pub fn parse_month(input: &str) -> TallyResult<Month> {
    Month::parse(input.trim()).map_err(|e| TallyError::Validation(e.to_string()))
}
