//! Audit logging for Pocketbook
//!
//! Every create, update and delete of a transaction or budget is appended to
//! `audit.log` as one JSON line, with before/after snapshots and a short
//! summary of changed fields.
//!
//! ```rust,ignore
//! use pocketbook::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.to_string(),
//!     Some(txn.description.clone()),
//!     &txn,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
