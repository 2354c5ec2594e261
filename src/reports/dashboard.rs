//! Dashboard summary
//!
//! Headline figures for the overview screen: all-time totals, the target
//! month's spending, recent activity and budget health.

use serde::Serialize;

use super::category::{category_expenses, sorted_by_amount_desc, CategoryExpense};
use super::utilization::BudgetUtilization;
use crate::display::format_percentage;
use crate::models::{Money, Month, TransactionRecord};

/// Number of categories listed under top spending
pub const TOP_CATEGORY_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month: Month,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses, may be negative
    pub net_balance: Money,
    pub month_expenses: Money,
    /// Newest first
    pub recent_transactions: Vec<TransactionRecord>,
    /// Highest spend in the target month, largest first
    pub top_categories: Vec<CategoryExpense>,
    pub total_budget: Money,
    pub total_budget_spent: Money,
    /// Spent over total budget as a percentage; not clamped
    pub budget_used_percentage: f64,
    pub over_budget_count: usize,
}

impl DashboardSummary {
    pub fn generate(
        transactions: &[TransactionRecord],
        utilization: &[BudgetUtilization],
        month: Month,
        recent_count: usize,
    ) -> Self {
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        for txn in transactions {
            if txn.is_income() {
                total_income += txn.amount;
            } else {
                total_expenses += txn.amount;
            }
        }

        let in_month: Vec<TransactionRecord> = transactions
            .iter()
            .filter(|t| t.month() == month)
            .cloned()
            .collect();
        let month_expenses = in_month
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        let mut top_categories = sorted_by_amount_desc(category_expenses(&in_month));
        top_categories.truncate(TOP_CATEGORY_COUNT);

        let mut recent: Vec<&TransactionRecord> = transactions.iter().collect();
        recent.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        let recent_transactions = recent.into_iter().take(recent_count).cloned().collect();

        let total_budget: Money = utilization.iter().map(|u| u.monthly_limit).sum();
        let total_budget_spent: Money = utilization.iter().map(|u| u.spent).sum();
        let budget_used_percentage = if total_budget.is_positive() {
            total_budget_spent.cents() as f64 / total_budget.cents() as f64 * 100.0
        } else {
            0.0
        };

        Self {
            month,
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
            month_expenses,
            recent_transactions,
            top_categories,
            total_budget,
            total_budget_spent,
            budget_used_percentage,
            over_budget_count: utilization.iter().filter(|u| u.is_over_budget).count(),
        }
    }

    /// Budget left across all categories; negative when overspent overall
    pub fn budget_remaining(&self) -> Money {
        self.total_budget - self.total_budget_spent
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.month.label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:      {:>14}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Expenses:    {:>14}\n",
            self.total_expenses.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Net Balance:       {:>14}\n",
            self.net_balance.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "This Month:        {:>14}\n",
            self.month_expenses.format_with_symbol(symbol)
        ));

        if !self.total_budget.is_zero() || self.over_budget_count > 0 {
            output.push_str("\nBudget\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            output.push_str(&format!(
                "Budgeted {}, spent {} ({}), remaining {}\n",
                self.total_budget.format_with_symbol(symbol),
                self.total_budget_spent.format_with_symbol(symbol),
                format_percentage(self.budget_used_percentage),
                self.budget_remaining().format_with_symbol(symbol)
            ));
            if self.over_budget_count > 0 {
                output.push_str(&format!(
                    "Over budget in {} categor{}\n",
                    self.over_budget_count,
                    if self.over_budget_count == 1 { "y" } else { "ies" }
                ));
            }
        }

        output.push_str("\nTop Categories This Month\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.top_categories.is_empty() {
            output.push_str("No expenses this month.\n");
        }
        for (rank, row) in self.top_categories.iter().enumerate() {
            output.push_str(&format!(
                "{}. {:<20} {:>14}\n",
                rank + 1,
                row.category.label(),
                row.amount.format_with_symbol(symbol)
            ));
        }

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent_transactions.is_empty() {
            output.push_str("No transactions yet.\n");
        }
        for txn in &self.recent_transactions {
            let signed = txn.signed_amount();
            output.push_str(&format!(
                "{}  {:<28} {:>14}\n",
                txn.date.format("%Y-%m-%d"),
                crate::display::truncate(&txn.description, 28),
                signed.format_with_symbol(symbol)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetDefinition, Category};
    use crate::reports::budget_utilization;
    use crate::test_fixtures::{expense, income};

    fn march() -> Month {
        "2024-03".parse().unwrap()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            income(1000, Category::Other, "2024-02-01"),
            expense(300, Category::Travel, "2024-02-10"),
            expense(120, Category::Groceries, "2024-03-02"),
            expense(80, Category::Groceries, "2024-03-09"),
            expense(60, Category::Entertainment, "2024-03-11"),
            expense(30, Category::Healthcare, "2024-03-12"),
            expense(10, Category::Education, "2024-03-13"),
            income(500, Category::Other, "2024-03-15"),
        ]
    }

    #[test]
    fn test_totals() {
        let summary = DashboardSummary::generate(&sample(), &[], march(), 5);
        assert_eq!(summary.total_income, Money::from_units(1500));
        assert_eq!(summary.total_expenses, Money::from_units(600));
        assert_eq!(summary.net_balance, Money::from_units(900));
        assert_eq!(summary.month_expenses, Money::from_units(300));
    }

    #[test]
    fn test_top_categories_limited_to_month() {
        let summary = DashboardSummary::generate(&sample(), &[], march(), 5);
        let top: Vec<Category> = summary.top_categories.iter().map(|c| c.category).collect();
        assert_eq!(
            top,
            vec![Category::Groceries, Category::Entertainment, Category::Healthcare]
        );
        assert_eq!(summary.top_categories[0].amount, Money::from_units(200));
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let summary = DashboardSummary::generate(&sample(), &[], march(), 3);
        let dates: Vec<String> = summary
            .recent_transactions
            .iter()
            .map(|t| t.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-15", "2024-03-13", "2024-03-12"]);
    }

    #[test]
    fn test_budget_health() {
        let budgets = vec![
            BudgetDefinition::new(Category::Groceries, Money::from_units(150), march()).unwrap(),
            BudgetDefinition::new(Category::Travel, Money::from_units(50), march()).unwrap(),
        ];
        let transactions = sample();
        let utilization = budget_utilization(&transactions, &budgets, march());

        let summary = DashboardSummary::generate(&transactions, &utilization, march(), 5);
        assert_eq!(summary.total_budget, Money::from_units(200));
        assert_eq!(summary.total_budget_spent, Money::from_units(200));
        assert_eq!(summary.over_budget_count, 1);
        assert_eq!(summary.budget_remaining(), Money::zero());
        assert!((summary.budget_used_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let summary = DashboardSummary::generate(&[], &[], march(), 5);
        assert_eq!(summary.net_balance, Money::zero());
        assert!(summary.recent_transactions.is_empty());
        assert!(summary.top_categories.is_empty());
        assert_eq!(summary.budget_used_percentage, 0.0);

        let text = summary.format_terminal("₹");
        assert!(text.contains("No transactions yet."));
    }
}
