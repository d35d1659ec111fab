//! Export CLI command

use std::path::PathBuf;

use clap::Args;

use super::parse_month;
use crate::config::settings::Settings;
use crate::display::Theme;
use crate::error::TallyResult;
use crate::export::{export_transactions_csv, ExportOutcome};
use crate::storage::Storage;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file path
    #[arg(short, long, default_value = "expenses.csv")]
    pub output: PathBuf,
    /// Export only this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Handle `export`
pub fn handle_export(storage: &Storage, settings: &Settings, args: ExportArgs) -> TallyResult<()> {
    let theme = Theme::from_settings(settings);
    let month = args.month.as_deref().map(parse_month).transpose()?;

    match export_transactions_csv(storage, month, &args.output)? {
        ExportOutcome::Written { path, rows } => println!(
            "{}",
            theme.success(format!("Exported {} transactions to {}", rows, path.display()))
        ),
        ExportOutcome::Empty => println!("{}", theme.warning("No data to export")),
    }

    Ok(())
}
