//! Core data models for Pocketbook
//!
//! Stored records (transactions and budgets) plus the value types they are
//! built from: money, month keys, categories and IDs.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::BudgetDefinition;
pub use category::{color_for_label, Category, UnknownCategory, DEFAULT_CATEGORY_COLOR};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError, MAX_PARSE_UNITS};
pub use month::{Month, MonthParseError};
pub use transaction::{TransactionKind, TransactionRecord};
