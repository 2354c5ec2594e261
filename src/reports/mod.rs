//! Reports module for Pocketbook
//!
//! Pure rollups over borrowed transaction and budget slices, plus report
//! wrappers that format them for the terminal and export them as CSV.

pub mod category;
pub mod dashboard;
pub mod monthly;
pub mod utilization;

pub use category::{category_expenses, sorted_by_amount_desc, CategoryExpense, CategoryReport};
pub use dashboard::DashboardSummary;
pub use monthly::{monthly_expenses, MonthlyExpense, MonthlyReport};
pub use utilization::{budget_utilization, BudgetUtilization, UtilizationReport};
