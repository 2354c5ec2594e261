use anyhow::Result;
use clap::{Parser, Subcommand};

use pocketbook::cli::{
    handle_budget_command, handle_export_command, handle_log_command, handle_report_command,
    handle_transaction_command, BudgetCommands, ExportCommands, LogArgs, ReportCommands,
    TransactionCommands,
};
use pocketbook::config::{paths::PocketbookPaths, settings::Settings};
use pocketbook::models::Category;
use pocketbook::storage::{init::initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "pocketbook",
    version,
    about = "Terminal personal-finance tracker",
    long_about = "Pocketbook records income and expenses, keeps monthly budgets per \
                  category, and reports where the money went from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Log(LogArgs),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PocketbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Log(args)) => {
            handle_log_command(&storage, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Pocketbook at: {}", paths.data_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Available categories:");
            for category in Category::ALL {
                println!("  - {}", category);
            }
            println!();
            println!("Run 'pocketbook transaction add --help' to record your first transaction.");
        }
        Some(Commands::Config) => {
            println!("Pocketbook Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Recent transactions: {}", settings.recent_transactions);
            println!("  Default list limit:  {}", settings.default_list_limit);
        }
        None => {
            println!("Pocketbook - Terminal personal-finance tracker");
            println!();
            println!("Run 'pocketbook --help' for usage information.");
        }
    }

    Ok(())
}
