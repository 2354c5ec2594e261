//! Budget definition model
//!
//! A budget is a monthly spending ceiling for one category. At most one
//! definition exists per (category, month); the budget repository keys its
//! map by that pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::month::Month;
use crate::validation::ValidationErrors;

/// A per-category, per-month spending ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDefinition {
    pub id: BudgetId,

    pub category: Category,

    /// Non-negative ceiling
    pub monthly_limit: Money,

    pub month: Month,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetDefinition {
    /// Create a budget, rejecting a negative limit
    pub fn new(
        category: Category,
        monthly_limit: Money,
        month: Month,
    ) -> Result<Self, ValidationErrors> {
        if monthly_limit.is_negative() {
            let mut errors = ValidationErrors::default();
            errors.add(
                "monthlyLimit",
                "Monthly limit must be greater than or equal to 0",
            );
            return Err(errors);
        }

        let now = Utc::now();
        Ok(Self {
            id: BudgetId::new(),
            category,
            monthly_limit,
            month,
            created_at: now,
            updated_at: now,
        })
    }

    /// The (category, month) pair that identifies this budget
    pub fn key(&self) -> (Category, Month) {
        (self.category, self.month)
    }
}

impl fmt::Display for BudgetDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: limit {}",
            self.month, self.category, self.monthly_limit
        )
    }
}
