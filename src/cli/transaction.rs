//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Category, TransactionKind, UnknownCategory};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;
use crate::validation::{validate_transaction, TransactionPayload};

use super::parse_month_arg;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount (e.g., "250" or "49.99")
        amount: String,
        /// What the money was for
        description: String,
        /// Category label (e.g., "Groceries")
        #[arg(short, long)]
        category: Option<String>,
        /// "income" or "expense"
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by category label
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by type ("income" or "expense")
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Only transactions in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category label
        #[arg(short, long)]
        category: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Check a transaction without saving it
    Check {
        /// Amount
        #[arg(short, long)]
        amount: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PocketbookResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive().to_string());
            let mut payload = TransactionPayload::new()
                .amount(amount)
                .description(description)
                .kind(kind)
                .date(date);
            payload.category = category;

            let txn = service.create(&payload)?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Type:     {}", txn.kind);
            println!("  Amount:   {}", txn.amount.format_with_symbol(symbol));
            println!("  Category: {}", txn.category);
            println!("  Desc:     {}", txn.description);
        }

        TransactionCommands::List {
            category,
            kind,
            month,
            limit,
        } => {
            let mut filter =
                TransactionFilter::new().limit(limit.unwrap_or(settings.default_list_limit));

            if let Some(label) = category {
                let category: Category = label
                    .parse()
                    .map_err(|e: UnknownCategory| PocketbookError::Validation(e.to_string()))?;
                filter = filter.category(category);
            }
            if let Some(raw) = kind {
                let kind: TransactionKind = raw.parse().map_err(PocketbookError::Validation)?;
                filter = filter.kind(kind);
            }
            if month.is_some() {
                filter = filter.month(parse_month_arg(month.as_deref())?);
            }

            let transactions = service.list(&filter)?;
            println!(
                "{}",
                format_transaction_table(&transactions, symbol, &settings.date_format)
            );
            if !transactions.is_empty() {
                println!("\nShowing {} transactions", transactions.len());
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Edit {
            id,
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let changes = TransactionPayload {
                amount,
                description,
                category,
                date,
                kind,
            };
            if changes == TransactionPayload::default() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(&id, &changes)?;
            println!("Updated transaction: {}", updated.id);
            println!("  Date:     {}", updated.date);
            println!("  Type:     {}", updated.kind);
            println!("  Amount:   {}", updated.amount.format_with_symbol(symbol));
            println!("  Category: {}", updated.category);
            println!("  Desc:     {}", updated.description);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id)?;
            println!(
                "Deleted transaction {}: {} {} ({})",
                txn.id,
                txn.date,
                txn.amount.format_with_symbol(symbol),
                txn.description
            );
        }

        TransactionCommands::Check {
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let payload = TransactionPayload {
                amount,
                description,
                category,
                date,
                kind,
            };
            let report = validate_transaction(&payload);
            if report.is_valid {
                println!("Transaction is valid.");
            } else {
                println!("Transaction is invalid:");
                for (field, message) in report.errors.iter() {
                    println!("  {}: {}", field, message);
                }
                return Err(PocketbookError::Invalid(report.errors));
            }
        }
    }

    Ok(())
}
