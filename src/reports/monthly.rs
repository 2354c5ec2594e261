//! Monthly Rollup
//!
//! Expense totals bucketed by calendar month.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Money, Month, TransactionRecord};

/// Total expense for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpense {
    /// `YYYY-MM` bucket
    pub month_key: Month,
    /// Human month name, e.g. "March 2024"
    pub display_label: String,
    /// Sum of expense amounts in the month
    pub amount: Money,
}

/// Sum expenses per month, ascending by month key
///
/// Income records are ignored. Months without expenses are absent.
pub fn monthly_expenses(transactions: &[TransactionRecord]) -> Vec<MonthlyExpense> {
    let mut totals: BTreeMap<Month, Money> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(txn.month()).or_default() += txn.amount;
    }

    totals
        .into_iter()
        .map(|(month_key, amount)| MonthlyExpense {
            month_key,
            display_label: month_key.label(),
            amount,
        })
        .collect()
}

/// Monthly expense report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyExpense>,
    /// Sum over all months
    pub total: Money,
}

impl MonthlyReport {
    pub fn generate(transactions: &[TransactionRecord]) -> Self {
        let months = monthly_expenses(transactions);
        let total = months.iter().map(|m| m.amount).sum();
        Self { months, total }
    }

    /// Largest monthly total, for scaling bars
    fn peak(&self) -> Money {
        self.months
            .iter()
            .map(|m| m.amount)
            .max()
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Expenses\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        let peak = self.peak().as_major();
        for row in &self.months {
            output.push_str(&format!(
                "{:<16} {:>14} {}\n",
                row.display_label,
                row.amount.format_with_symbol(symbol),
                crate::display::format_bar(row.amount.as_major(), peak, 24)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PocketbookResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PocketbookError::Export(e.to_string());

        csv.write_record(["Month", "Label", "Amount"])
            .map_err(export_err)?;
        for row in &self.months {
            csv.write_record([
                row.month_key.to_string(),
                row.display_label.clone(),
                format!("{:.2}", row.amount.as_major()),
            ])
            .map_err(export_err)?;
        }
        csv.flush()?;
        Ok(())
    }
}
