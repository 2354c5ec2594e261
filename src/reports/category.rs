//! Category Rollup
//!
//! Expense totals per category, each tagged with the category's chart color.

use serde::Serialize;
use std::io::Write;

use crate::display::{format_bar, format_percentage};
use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Category, Money, TransactionRecord};

/// Total expense for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category: Category,
    pub amount: Money,
    pub color: &'static str,
}

/// Sum expenses per category in first-encounter order
///
/// A category only appears if at least one expense names it.
pub fn category_expenses(transactions: &[TransactionRecord]) -> Vec<CategoryExpense> {
    let mut rows: Vec<CategoryExpense> = Vec::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match rows.iter_mut().find(|row| row.category == txn.category) {
            Some(row) => row.amount += txn.amount,
            None => rows.push(CategoryExpense {
                category: txn.category,
                amount: txn.amount,
                color: txn.category.color(),
            }),
        }
    }

    rows
}

/// Reorder rows largest first, ties broken by category label
pub fn sorted_by_amount_desc(mut rows: Vec<CategoryExpense>) -> Vec<CategoryExpense> {
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    rows
}

/// Category breakdown report
#[derive(Debug, Clone)]
pub struct CategoryReport {
    /// Rows, largest first
    pub categories: Vec<CategoryExpense>,
    pub total: Money,
}

impl CategoryReport {
    pub fn generate(transactions: &[TransactionRecord]) -> Self {
        let categories = sorted_by_amount_desc(category_expenses(transactions));
        let total = categories.iter().map(|c| c.amount).sum();
        Self { categories, total }
    }

    /// Share of the total for a row, 0-100
    pub fn share(&self, row: &CategoryExpense) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            row.amount.cents() as f64 / self.total.cents() as f64 * 100.0
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Expenses by Category\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        for row in &self.categories {
            let share = self.share(row);
            output.push_str(&format!(
                "{:<18} {:>14} {:>6} {}\n",
                row.category.label(),
                row.amount.format_with_symbol(symbol),
                format_percentage(share),
                format_bar(share, 100.0, 20)
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> PocketbookResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PocketbookError::Export(e.to_string());

        csv.write_record(["Category", "Amount", "Percentage", "Color"])
            .map_err(export_err)?;
        for row in &self.categories {
            csv.write_record([
                row.category.label().to_string(),
                format!("{:.2}", row.amount.as_major()),
                format!("{:.2}", self.share(row)),
                row.color.to_string(),
            ])
            .map_err(export_err)?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{expense, expense_cents, income};

    #[test]
    fn test_groceries_travel_scenario() {
        let transactions = vec![
            expense(200, Category::Groceries, "2024-03-01"),
            expense(50, Category::Groceries, "2024-03-02"),
            expense(300, Category::Travel, "2024-03-03"),
        ];

        let rows = category_expenses(&transactions);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, Category::Groceries);
        assert_eq!(rows[0].amount, Money::from_units(250));
        assert_eq!(rows[0].color, "#BB8FCE");
        assert_eq!(rows[1].category, Category::Travel);
        assert_eq!(rows[1].amount, Money::from_units(300));
    }

    #[test]
    fn test_first_encounter_order() {
        let transactions = vec![
            expense(10, Category::Travel, "2024-03-01"),
            expense(10, Category::Education, "2024-03-02"),
            expense(10, Category::Travel, "2024-03-03"),
        ];

        let order: Vec<Category> = category_expenses(&transactions)
            .iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(order, vec![Category::Travel, Category::Education]);
    }

    #[test]
    fn test_no_zero_entries() {
        let transactions = vec![
            income(1000, Category::Shopping, "2024-03-01"),
            expense(25, Category::Healthcare, "2024-03-02"),
        ];

        let rows = category_expenses(&transactions);
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.amount.is_positive()));
        assert!(rows.iter().all(|r| r.category != Category::Shopping));
    }

    #[test]
    fn test_total_is_conserved() {
        let transactions = vec![
            expense_cents(333, Category::Groceries, "2024-01-01"),
            expense_cents(334, Category::Groceries, "2024-02-01"),
            expense_cents(1, Category::Other, "2024-02-02"),
            income(50, Category::Other, "2024-02-03"),
            expense_cents(99_999, Category::Travel, "2023-11-11"),
        ];

        let rolled: Money = category_expenses(&transactions).iter().map(|r| r.amount).sum();
        let monthly: Money = crate::reports::monthly_expenses(&transactions)
            .iter()
            .map(|m| m.amount)
            .sum();
        assert_eq!(rolled, Money::from_cents(100_667));
        assert_eq!(rolled, monthly);
    }

    #[test]
    fn test_idempotent() {
        let transactions = vec![
            expense(20, Category::Groceries, "2024-03-01"),
            expense(30, Category::Travel, "2024-03-02"),
        ];
        let before = transactions.clone();
        assert_eq!(category_expenses(&transactions), category_expenses(&transactions));
        assert_eq!(transactions, before);
    }

    #[test]
    fn test_sorted_by_amount_desc() {
        let rows = category_expenses(&[
            expense(20, Category::Travel, "2024-03-01"),
            expense(50, Category::Groceries, "2024-03-02"),
            expense(20, Category::Education, "2024-03-03"),
        ]);

        let order: Vec<Category> = sorted_by_amount_desc(rows)
            .iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(
            order,
            vec![Category::Groceries, Category::Education, Category::Travel]
        );
    }

    #[test]
    fn test_report_shares_and_csv() {
        let report = CategoryReport::generate(&[
            expense(75, Category::Groceries, "2024-03-01"),
            expense(25, Category::Travel, "2024-03-02"),
        ]);
        assert_eq!(report.total, Money::from_units(100));
        assert!((report.share(&report.categories[0]) - 75.0).abs() < f64::EPSILON);

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert!(csv.contains("Groceries,75.00,75.00,#BB8FCE"));

        let text = report.format_terminal("₹");
        assert!(text.contains("Travel"));
        assert!(text.contains("₹100.00"));
    }
}
