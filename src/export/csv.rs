//! CSV export of stored records

use std::io::Write;

use crate::error::{PocketbookError, PocketbookResult};
use crate::storage::Storage;

fn export_err(e: csv::Error) -> PocketbookError {
    PocketbookError::Export(e.to_string())
}

/// Export all transactions to CSV, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> PocketbookResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["ID", "Date", "Type", "Category", "Description", "Amount"])
        .map_err(export_err)?;

    for txn in storage.transactions.get_all()? {
        csv.write_record([
            txn.id.as_uuid().to_string(),
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.category.label().to_string(),
            txn.description.clone(),
            format!("{:.2}", txn.amount.as_major()),
        ])
        .map_err(export_err)?;
    }

    csv.flush()?;
    Ok(())
}

/// Export all budgets to CSV, by month then category label
pub fn export_budgets_csv<W: Write>(storage: &Storage, writer: W) -> PocketbookResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["ID", "Month", "Category", "Monthly Limit"])
        .map_err(export_err)?;

    for budget in storage.budgets.get_all()? {
        csv.write_record([
            budget.id.as_uuid().to_string(),
            budget.month.to_string(),
            budget.category.label().to_string(),
            format!("{:.2}", budget.monthly_limit.as_major()),
        ])
        .map_err(export_err)?;
    }

    csv.flush()?;
    Ok(())
}
