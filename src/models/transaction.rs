//! Transaction model
//!
//! A transaction is an immutable fact: an amount of income or expense in one
//! category on one day. Only the service layer ever replaces a stored record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;
use super::month::Month;
use crate::validation::TransactionDraft;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

/// A stored income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,

    /// Always strictly positive
    pub amount: Money,

    /// Trimmed, non-empty, at most 200 characters
    pub description: String,

    pub category: Category,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a record from validated input, assigning a fresh identity
    pub fn new(draft: TransactionDraft) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
            kind: draft.kind,
            date: draft.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the replacement for this record, keeping its identity
    pub fn replaced_with(&self, draft: TransactionDraft) -> Self {
        Self {
            id: self.id,
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
            kind: draft.kind,
            date: draft.date,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// The month bucket this record falls in
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    /// Amount with sign applied: negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => Money::zero() - self.amount,
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount(),
            self.category
        )
    }
}
