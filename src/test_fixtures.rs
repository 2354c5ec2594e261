//! Shared builders for unit tests

use chrono::NaiveDate;

use crate::models::{Category, Money, TransactionKind, TransactionRecord};
use crate::validation::TransactionDraft;

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn record(units: i64, category: Category, on: &str, kind: TransactionKind) -> TransactionRecord {
    let description = match kind {
        TransactionKind::Expense => "Test expense",
        TransactionKind::Income => "Test income",
    };
    let draft = TransactionDraft::new(
        Money::from_units(units),
        description,
        category,
        kind,
        date(on),
    )
    .unwrap();
    TransactionRecord::new(draft)
}

pub(crate) fn expense(units: i64, category: Category, on: &str) -> TransactionRecord {
    record(units, category, on, TransactionKind::Expense)
}

pub(crate) fn income(units: i64, category: Category, on: &str) -> TransactionRecord {
    record(units, category, on, TransactionKind::Income)
}

pub(crate) fn expense_cents(cents: i64, category: Category, on: &str) -> TransactionRecord {
    let draft = TransactionDraft::new(
        Money::from_cents(cents),
        "Test expense",
        category,
        TransactionKind::Expense,
        date(on),
    )
    .unwrap();
    TransactionRecord::new(draft)
}
