//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod log;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use log::{handle_log_command, LogArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::Month;

/// Parse a `--month` argument, defaulting to the current month
pub(crate) fn parse_month_arg(month: Option<&str>) -> PocketbookResult<Month> {
    match month {
        Some(raw) => raw.parse().map_err(|_| {
            PocketbookError::Validation(format!(
                "Invalid month '{}'. Use YYYY-MM (e.g., 2024-03)",
                raw
            ))
        }),
        None => Ok(Month::current()),
    }
}
