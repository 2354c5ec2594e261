//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetDefinition;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Monthly Limit")]
    limit: String,
    #[tabled(rename = "Color")]
    color: &'static str,
}

/// Format one month's budgets as a table
pub fn format_budget_table(budgets: &[BudgetDefinition], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        category: b.category.label(),
        limit: b.monthly_limit.format_with_symbol(symbol),
        color: b.category.color(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
