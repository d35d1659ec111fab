//! CSV export of ledger transactions
//!
//! Columns are `Date,Amount,Category,Description,Type`. Amounts are written
//! as plain two-decimal numbers and a missing description as `-`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::TallyResult;
use crate::models::{Month, Transaction};
use crate::storage::{Storage, TransactionQuery};

/// One exported line
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Type")]
    kind: &'static str,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            amount: txn.amount.to_string(),
            category: &txn.category,
            description: txn.description.as_deref().unwrap_or("-"),
            kind: txn.kind.as_str(),
        }
    }
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// `rows` transactions were written to `path`
    Written { path: PathBuf, rows: usize },
    /// Nothing matched, no file was created
    Empty,
}

/// Write `transactions` as CSV (header included) to `writer`
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> TallyResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for txn in transactions {
        csv_writer.serialize(ExportRow::from(txn))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export transactions, optionally limited to one month, newest first
///
/// The output file is only created when at least one transaction matches.
pub fn export_transactions_csv(
    storage: &Storage,
    month: Option<Month>,
    path: &Path,
) -> TallyResult<ExportOutcome> {
    let query = match month {
        Some(month) => TransactionQuery::new().in_month(month),
        None => TransactionQuery::new(),
    };
    let transactions = storage.transactions().find(&query)?;

    if transactions.is_empty() {
        tracing::debug!(path = %path.display(), "nothing to export");
        return Ok(ExportOutcome::Empty);
    }

    let file = File::create(path)?;
    write_transactions_csv(&transactions, file)?;
    tracing::info!(rows = transactions.len(), path = %path.display(), "exported transactions");

    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: transactions.len(),
    })
}
