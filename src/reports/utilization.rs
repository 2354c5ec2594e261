//! Budget Utilization Calculator
//!
//! Compares each budget's ceiling with the expenses recorded against its
//! category in a target month.

use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use crate::display::{format_bar, format_percentage};
use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{BudgetDefinition, BudgetId, Category, Money, Month, TransactionRecord};

/// How much of one budget has been used
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUtilization {
    pub id: BudgetId,
    pub category: Category,
    pub monthly_limit: Money,
    pub month: Month,
    /// Expenses in the category during the target month
    pub spent: Money,
    /// `limit - spent`, floored at zero
    pub remaining: Money,
    /// Share of the limit used, 0-100. Saturates at 100; a zero limit yields 0.
    pub percentage: f64,
    pub is_over_budget: bool,
}

impl BudgetUtilization {
    fn compute(budget: &BudgetDefinition, spent: Money) -> Self {
        let limit = budget.monthly_limit;
        let percentage = if limit.is_positive() {
            (spent.cents() as f64 / limit.cents() as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            id: budget.id,
            category: budget.category,
            monthly_limit: limit,
            month: budget.month,
            spent,
            remaining: limit.saturating_remaining(spent),
            percentage,
            is_over_budget: spent > limit,
        }
    }

    /// Amount spent past the limit, zero when within budget
    pub fn overage(&self) -> Money {
        self.spent.saturating_remaining(self.monthly_limit)
    }
}

/// Compute utilization for every budget, in input order
///
/// Only expenses whose month key equals `month` count as spent. Budgets
/// themselves are not filtered by month; callers pass the set they want.
pub fn budget_utilization(
    transactions: &[TransactionRecord],
    budgets: &[BudgetDefinition],
    month: Month,
) -> Vec<BudgetUtilization> {
    let mut spent: HashMap<Category, Money> = HashMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && t.month() == month)
    {
        *spent.entry(txn.category).or_default() += txn.amount;
    }

    budgets
        .iter()
        .map(|budget| {
            let spent = spent.get(&budget.category).copied().unwrap_or_default();
            BudgetUtilization::compute(budget, spent)
        })
        .collect()
}

/// Budget utilization report for one month
#[derive(Debug, Clone)]
pub struct UtilizationReport {
    pub month: Month,
    pub rows: Vec<BudgetUtilization>,
    pub total_limit: Money,
    pub total_spent: Money,
}

impl UtilizationReport {
    pub fn generate(
        transactions: &[TransactionRecord],
        budgets: &[BudgetDefinition],
        month: Month,
    ) -> Self {
        let rows = budget_utilization(transactions, budgets, month);
        Self::from_rows(month, rows)
    }

    pub fn from_rows(month: Month, rows: Vec<BudgetUtilization>) -> Self {
        let total_limit = rows.iter().map(|r| r.monthly_limit).sum();
        let total_spent = rows.iter().map(|r| r.spent).sum();
        Self {
            month,
            rows,
            total_limit,
            total_spent,
        }
    }

    pub fn over_budget_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_over_budget).count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Utilization - {}\n", self.month.label()));
        output.push_str(&"=".repeat(84));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str(&format!("No budgets set for {}.\n", self.month));
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>12} {:>12} {:>12} {:>6}\n",
            "Category", "Limit", "Spent", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(84));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.is_over_budget {
                format!(" over by {}", row.overage().format_with_symbol(symbol))
            } else {
                String::new()
            };
            output.push_str(&format!(
                "{:<18} {:>12} {:>12} {:>12} {:>6} {}{}\n",
                row.category.label(),
                row.monthly_limit.format_with_symbol(symbol),
                row.spent.format_with_symbol(symbol),
                row.remaining.format_with_symbol(symbol),
                format_percentage(row.percentage),
                format_bar(row.percentage, 100.0, 12),
                marker
            ));
        }

        output.push_str(&"-".repeat(84));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>12} {:>12}\n",
            "TOTAL",
            self.total_limit.format_with_symbol(symbol),
            self.total_spent.format_with_symbol(symbol)
        ));
        let over = self.over_budget_count();
        if over > 0 {
            let noun = if over == 1 { "category" } else { "categories" };
            output.push_str(&format!("{} {} over budget\n", over, noun));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PocketbookResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PocketbookError::Export(e.to_string());

        csv.write_record([
            "Month",
            "Category",
            "Limit",
            "Spent",
            "Remaining",
            "Percentage",
            "Over Budget",
        ])
        .map_err(export_err)?;
        for row in &self.rows {
            csv.write_record([
                row.month.to_string(),
                row.category.label().to_string(),
                format!("{:.2}", row.monthly_limit.as_major()),
                format!("{:.2}", row.spent.as_major()),
                format!("{:.2}", row.remaining.as_major()),
                format!("{:.2}", row.percentage),
                row.is_over_budget.to_string(),
            ])
            .map_err(export_err)?;
        }
        csv.flush()?;
        Ok(())
    }
}
