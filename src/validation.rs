//! Transaction record validation
//!
//! Two layers:
//!
//! - [`validate_transaction`] checks a raw payload field by field and reports
//!   every failing field with a user-facing message. It never normalizes.
//! - [`TransactionDraft::from_payload`] runs those checks and then the
//!   storage-level rules (closed category set, description length, parseable
//!   date), producing typed values ready to become a record.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Category, Money, Month, TransactionKind};

/// Longest accepted description, in characters, after trimming
pub const MAX_DESCRIPTION_LEN: usize = 200;

pub const AMOUNT_REQUIRED: &str = "Amount must be greater than 0";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const DATE_REQUIRED: &str = "Date is required";
pub const TYPE_INVALID: &str = "Type must be either income or expense";

/// Field name to message mapping, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Record an error for a field, replacing any earlier one
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Outcome of checking a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: ValidationErrors,
}

/// A candidate transaction as submitted by a form or the CLI
///
/// Every field is optional and untyped; nothing has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl TransactionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Check a payload, reporting every failing field
pub fn validate_transaction(payload: &TransactionPayload) -> ValidationReport {
    let mut errors = ValidationErrors::default();

    let amount_ok = present(&payload.amount)
        .and_then(|raw| Money::parse(raw).ok())
        .is_some_and(|amount| amount.is_positive());
    if !amount_ok {
        errors.add("amount", AMOUNT_REQUIRED);
    }

    if present(&payload.description).map_or(true, |d| d.trim().is_empty()) {
        errors.add("description", DESCRIPTION_REQUIRED);
    }

    if present(&payload.category).is_none() {
        errors.add("category", CATEGORY_REQUIRED);
    }

    if present(&payload.date).is_none() {
        errors.add("date", DATE_REQUIRED);
    }

    if !matches!(payload.kind.as_deref(), Some("income") | Some("expense")) {
        errors.add("type", TYPE_INVALID);
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Parse a calendar date, accepting `YYYY-MM-DD` or an RFC 3339 timestamp
///
/// A timestamp keeps the calendar date as written in its own offset. Years
/// outside what a `YYYY-MM` month key can hold are rejected.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .filter(|date| Month::new(date.year(), date.month()).is_some())
}

/// Typed, checked transaction fields, ready to become a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: Money,
    pub description: String,
    pub category: Category,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Build a draft from typed values, trimming the description
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<Self, ValidationErrors> {
        let description = description.into().trim().to_string();
        let mut errors = ValidationErrors::default();

        if !amount.is_positive() {
            errors.add("amount", AMOUNT_REQUIRED);
        }
        check_description(&description, &mut errors);
        errors.into_result()?;

        Ok(Self {
            amount,
            description,
            category,
            kind,
            date,
        })
    }

    /// Validate a raw payload and convert it to typed values
    pub fn from_payload(payload: &TransactionPayload) -> Result<Self, ValidationErrors> {
        let ValidationReport { mut errors, .. } = validate_transaction(payload);

        let description = payload
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if !errors.contains("description") {
            check_description(&description, &mut errors);
        }

        let category = present(&payload.category).and_then(|raw| raw.parse::<Category>().ok());
        if category.is_none() && !errors.contains("category") {
            errors.add(
                "category",
                "Category must be one of the predefined categories",
            );
        }

        let date = present(&payload.date).and_then(parse_date);
        if date.is_none() && !errors.contains("date") {
            errors.add("date", "Date must be a valid date (YYYY-MM-DD)");
        }

        let amount = present(&payload.amount).and_then(|raw| Money::parse(raw).ok());
        let kind = payload
            .kind
            .as_deref()
            .and_then(|raw| raw.parse::<TransactionKind>().ok());

        match (amount, category, kind, date) {
            (Some(amount), Some(category), Some(kind), Some(date)) if errors.is_empty() => {
                Ok(Self {
                    amount,
                    description,
                    category,
                    kind,
                    date,
                })
            }
            _ => Err(errors),
        }
    }
}

fn check_description(description: &str, errors: &mut ValidationErrors) {
    let len = description.chars().count();
    if len == 0 {
        errors.add("description", DESCRIPTION_REQUIRED);
    } else if len > MAX_DESCRIPTION_LEN {
        errors.add(
            "description",
            format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            ),
        );
    }
}
