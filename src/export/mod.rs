//! Export module for Pocketbook
//!
//! - CSV: transactions and budgets, spreadsheet-compatible
//! - JSON: machine-readable full export with schema versioning
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_budgets_csv, export_transactions_csv};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
