//! Pocketbook - terminal personal-finance tracker
//!
//! This library provides the core of the Pocketbook application: a flat list
//! of income and expense transactions, per-category monthly budgets, and the
//! pure aggregation routines that turn them into reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, categories, money)
//! - `validation`: Transaction payload validation
//! - `reports`: Monthly, category, budget utilization and dashboard rollups
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `pocketbook` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbook::reports::{budget_utilization, monthly_expenses};
//!
//! let months = monthly_expenses(&transactions);
//! let rows = budget_utilization(&transactions, &budgets, month);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod test_fixtures;

pub use error::{PocketbookError, PocketbookResult};
