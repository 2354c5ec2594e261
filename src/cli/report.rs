//! CLI commands for reports
//!
//! Provides commands for generating and exporting the spending reports.

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::settings::Settings;
use crate::error::{PocketbookError, PocketbookResult};
use crate::reports::{CategoryReport, DashboardSummary, MonthlyReport, UtilizationReport};
use crate::services::{BudgetService, TransactionService};
use crate::storage::Storage;

use super::parse_month_arg;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Expense totals per month
    Monthly {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense totals per category, largest first
    #[command(alias = "category")]
    Categories {
        /// Only count expenses in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget utilization for a month
    Budget {
        /// Budget month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Headline totals, top categories and recent activity
    Dashboard {
        /// Target month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> PocketbookResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let transactions = TransactionService::new(storage).all()?;

    match cmd {
        ReportCommands::Monthly { output } => {
            let report = MonthlyReport::generate(&transactions);
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Monthly report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Categories { month, output } => {
            let report = match month {
                Some(raw) => {
                    let month = parse_month_arg(Some(&raw))?;
                    let in_month: Vec<_> = transactions
                        .into_iter()
                        .filter(|t| t.month() == month)
                        .collect();
                    CategoryReport::generate(&in_month)
                }
                None => CategoryReport::generate(&transactions),
            };
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Category report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Budget { month, output } => {
            let month = parse_month_arg(month.as_deref())?;
            let rows = BudgetService::new(storage).utilization(month)?;
            let report = UtilizationReport::from_rows(month, rows);
            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Budget report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Dashboard { month, json } => {
            let month = parse_month_arg(month.as_deref())?;
            let utilization = BudgetService::new(storage).utilization(month)?;
            let summary = DashboardSummary::generate(
                &transactions,
                &utilization,
                month,
                settings.recent_transactions,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.format_terminal(symbol));
            }
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> PocketbookResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PocketbookError::Export(format!(
            "Failed to create file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}
