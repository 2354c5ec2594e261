//! Service layer for Pocketbook
//!
//! Services sit between the CLI and storage: they validate input, persist
//! through the repositories and write the audit trail.

pub mod budget;
pub mod transaction;

pub use budget::BudgetService;
pub use transaction::{TransactionFilter, TransactionService, DEFAULT_LIST_LIMIT};
