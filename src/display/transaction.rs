//! Transaction display formatting

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use super::Theme;
use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Format transactions as a table followed by their net total
pub fn format_transaction_table(transactions: &[Transaction], theme: &Theme) -> String {
    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: theme.neutral(txn.date.format("%Y-%m-%d").to_string()),
        category: txn.category.clone(),
        description: txn.description.clone().unwrap_or_else(|| "-".into()),
        amount: theme.directed(txn.amount, txn.kind),
        kind: txn.kind.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(4..), Alignment::right());

    let net_line = match Money::checked_sum(transactions.iter().map(Transaction::signed_amount)) {
        Some(net) if net.is_negative() => theme.error(format!("Net: {}", theme.money(net))),
        Some(net) => theme.success(format!("Net: {}", theme.money(net))),
        None => theme.warning("Net: out of range"),
    };

    format!("{}\n\n{}\n", table, theme.header(net_line))
}

/// Format a single transaction for confirmation prompts and reports
pub fn format_transaction_details(txn: &Transaction, theme: &Theme) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", theme.directed(txn.amount, txn.kind)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}
