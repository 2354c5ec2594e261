//! Display formatting for terminal output

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::format_budget_table;
pub use report::{format_bar, format_percentage, truncate};
pub use transaction::{format_transaction_details, format_transaction_table};
