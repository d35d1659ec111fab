//! Transaction CLI commands
//!
//! Implements add, list, search and delete.

use std::io::IsTerminal;

use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::{parse_amount, parse_month};
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table, Theme};
use crate::error::{TallyError, TallyResult};
use crate::models::{KindFilter, NewTransaction, TransactionId, TransactionKind};
use crate::services::{DateNormalizer, Ledger, TransactionFilter};
use crate::storage::Storage;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Amount (e.g. "12.50"), always positive
    pub amount: String,
    /// Category name
    #[arg(short, long)]
    pub category: Option<String>,
    /// Description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Date: YYYY-MM-DD, MM/DD[/YYYY], DD/MM[/YYYY], today, yesterday, "last N"
    #[arg(long, default_value = "today")]
    pub date: String,
    /// Transaction type
    #[arg(short = 't', long = "type", value_enum, default_value_t = TransactionKind::Expense)]
    pub kind: TransactionKind,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show transactions from the last N days
    #[arg(long)]
    pub days: Option<u32>,
    /// Filter by category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Show a specific month (YYYY-MM); overrides --days
    #[arg(short, long)]
    pub month: Option<String>,
    /// Filter by type
    #[arg(short = 't', long = "type", value_enum, default_value_t = KindFilter::All)]
    pub kind: KindFilter,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in descriptions and categories (case-sensitive)
    pub query: String,
    /// Filter by type
    #[arg(short = 't', long = "type", value_enum, default_value_t = KindFilter::All)]
    pub kind: KindFilter,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Transaction ID
    pub id: TransactionId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Handle `add`
pub fn handle_add(storage: &Storage, settings: &Settings, args: AddArgs) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let dates = DateNormalizer::local();
    let ledger = Ledger::with_today(storage, dates.today());

    let amount = parse_amount(&args.amount)?;
    let category = args
        .category
        .unwrap_or_else(|| settings.default_category.clone());
    let mut new = NewTransaction::new(dates.normalize(&args.date), amount, category, args.kind);
    if let Some(description) = args.description {
        new = new.with_description(description);
    }

    let txn = ledger.add(new)?;
    println!(
        "{} added to {} on {} (#{})",
        theme.directed(txn.amount, txn.kind),
        txn.category,
        txn.date.format("%Y-%m-%d"),
        txn.id
    );

    Ok(())
}

/// Handle `list`
pub fn handle_list(storage: &Storage, settings: &Settings, args: ListArgs) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let ledger = Ledger::new(storage);

    let days = args.days.unwrap_or(settings.default_list_days);
    let mut filter = TransactionFilter::new().since_days(days).kind(args.kind);
    let title = match args.month.as_deref() {
        Some(month) => {
            let month = parse_month(month)?;
            filter = filter.month(month);
            format!("Transactions for {}", month)
        }
        None => format!("Transactions (last {} days)", days),
    };
    if let Some(category) = args.category {
        filter = filter.category(category);
    }

    let transactions = ledger.query(&filter)?;
    if transactions.is_empty() {
        println!("{}", theme.warning("No transactions found."));
        return Ok(());
    }

    println!("{}", theme.header(title));
    print!("{}", format_transaction_table(&transactions, &theme));
    Ok(())
}

/// Handle `search`
pub fn handle_search(storage: &Storage, settings: &Settings, args: SearchArgs) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let ledger = Ledger::new(storage);

    let results = ledger.search(&args.query, args.kind)?;
    if results.is_empty() {
        println!("{}", theme.warning(format!("No results for '{}'", args.query)));
        return Ok(());
    }

    println!("{}", theme.header(format!("Search results for '{}'", args.query)));
    print!("{}", format_transaction_table(&results, &theme));
    Ok(())
}

/// Handle `delete`
///
/// A missing transaction is reported rather than treated as a failure.
pub fn handle_delete(storage: &Storage, settings: &Settings, args: DeleteArgs) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let ledger = Ledger::new(storage);

    let txn = match ledger.find(args.id)? {
        Some(txn) => txn,
        None => {
            println!("{}", theme.error(format!("Transaction #{} not found", args.id)));
            return Ok(());
        }
    };

    print!("{}", format_transaction_details(&txn, &theme));

    if !args.yes && !confirm_delete()? {
        println!("Cancelled.");
        return Ok(());
    }

    match ledger.delete(args.id) {
        Ok(_) => println!("{}", theme.success(format!("Deleted transaction #{}", args.id))),
        Err(e) if e.is_not_found() => println!("{}", theme.error(e.to_string())),
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Ask before deleting; without a terminal the answer is no
fn confirm_delete() -> TallyResult<bool> {
    if !std::io::stdin().is_terminal() {
        tracing::debug!("stdin is not a terminal, declining delete");
        return Ok(false);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Delete this transaction?")
        .default(false)
        .interact()
        .map_err(|e| TallyError::Io(e.to_string()))
}
