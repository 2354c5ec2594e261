//! Budget CLI commands
//!
//! Implements CLI commands for setting, listing and clearing the monthly
//! budgets of each category.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_table;
use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Category, Money, UnknownCategory};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_month_arg;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Replace the budgets of a month
    Set {
        /// Budget month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Limits as Category=amount (e.g., Groceries=200 Travel=150.50)
        #[arg(required = true)]
        limits: Vec<String>,
    },

    /// List the budgets of a month
    List {
        /// Budget month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove every budget of a month
    Clear {
        /// Budget month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PocketbookResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { month, limits } => {
            let month = parse_month_arg(month.as_deref())?;
            let limits = limits
                .iter()
                .map(|pair| parse_limit(pair))
                .collect::<PocketbookResult<Vec<_>>>()?;

            let budgets = service.set_month(month, &limits)?;
            println!("Set {} budget(s) for {}:", budgets.len(), month.label());
            println!("{}", format_budget_table(&budgets, symbol));
        }

        BudgetCommands::List { month } => {
            let month = parse_month_arg(month.as_deref())?;
            let budgets = service.list_for_month(month)?;

            println!("Budgets for {}", month.label());
            println!("{}", format_budget_table(&budgets, symbol));
        }

        BudgetCommands::Clear { month } => {
            let month = parse_month_arg(month.as_deref())?;
            let removed = service.clear_month(month)?;
            println!("Removed {} budget(s) for {}", removed, month.label());
        }
    }

    Ok(())
}

/// Parse one `Category=amount` argument
fn parse_limit(pair: &str) -> PocketbookResult<(Category, Money)> {
    let (label, amount) = pair.split_once('=').ok_or_else(|| {
        PocketbookError::Validation(format!(
            "Invalid budget '{}'. Use Category=amount (e.g., Groceries=200)",
            pair
        ))
    })?;

    let category: Category = label
        .parse()
        .map_err(|e: UnknownCategory| PocketbookError::Validation(e.to_string()))?;
    let limit = Money::parse(amount).map_err(|e| {
        PocketbookError::Validation(format!("Invalid amount for {}: {}", category, e))
    })?;

    Ok((category, limit))
}
