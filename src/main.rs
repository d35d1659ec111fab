use anyhow::Result;
use clap::{Parser, Subcommand};

use tally_cli::cli::{
    handle_add, handle_budget_status, handle_categories, handle_dashboard, handle_delete,
    handle_export, handle_list, handle_search, handle_set_budget, handle_stats, handle_summary,
    AddArgs, BudgetStatusArgs, DeleteArgs, ExportArgs, ListArgs, SearchArgs, SetBudgetArgs,
    SummaryArgs,
};
use tally_cli::config::{Settings, TallyPaths};
use tally_cli::logging::init_tracing;
use tally_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Track expenses, income and monthly budgets from the terminal",
    long_about = "Tally records dated expenses and income in a local SQLite ledger, \
                  tracks spending against monthly per-category budgets, and \
                  summarizes where the money went."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an expense or income
    Add(AddArgs),

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a monthly summary by category
    Summary(SummaryArgs),

    /// Set a category's budget for a month
    SetBudget(SetBudgetArgs),

    /// Show budget status for a month
    BudgetStatus(BudgetStatusArgs),

    /// Search descriptions and categories
    Search(SearchArgs),

    /// Export transactions to CSV
    Export(ExportArgs),

    /// Show key figures for the current month
    Dashboard,

    /// Delete a transaction by ID
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// List categories in use
    Categories,

    /// Show all-time and recent statistics
    Stats,

    /// Create the data directory, database and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Tally - expense and income ledger");
        println!();
        println!("Run 'tally --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            let storage = Storage::open(&paths)?;
            settings.save(&paths)?;
            println!("Initialized Tally at: {}", paths.base_dir().display());
            if let Some(db) = storage.path() {
                println!("Database: {}", db.display());
            }
            println!("Settings: {}", paths.settings_file().display());
        }
        Commands::Config => {
            println!("Tally Configuration");
            println!("===================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Database:       {}", paths.database_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Default category:  {}", settings.default_category);
            println!("  Default list days: {}", settings.default_list_days);
            println!("  Top categories:    {}", settings.top_categories);
            println!("  Color:             {}", settings.color);
        }
        command => {
            let storage = Storage::open(&paths)?;
            run(&storage, &settings, command)?;
        }
    }

    Ok(())
}

fn run(storage: &Storage, settings: &Settings, command: Commands) -> Result<()> {
    match command {
        Commands::Add(args) => handle_add(storage, settings, args)?,
        Commands::List(args) => handle_list(storage, settings, args)?,
        Commands::Summary(args) => handle_summary(storage, settings, args)?,
        Commands::SetBudget(args) => handle_set_budget(storage, settings, args)?,
        Commands::BudgetStatus(args) => handle_budget_status(storage, settings, args)?,
        Commands::Search(args) => handle_search(storage, settings, args)?,
        Commands::Export(args) => handle_export(storage, settings, args)?,
        Commands::Dashboard => handle_dashboard(storage, settings)?,
        Commands::Delete(args) => handle_delete(storage, settings, args)?,
        Commands::Categories => handle_categories(storage, settings)?,
        Commands::Stats => handle_stats(storage, settings)?,
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
