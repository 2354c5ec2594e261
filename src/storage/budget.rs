//! Budget repository for JSON storage
//!
//! Manages loading and saving budget definitions to budgets.json. The map is
//! keyed by (category, month), so a second definition for the same pair
//! replaces the first.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use crate::error::PocketbookError;
use crate::models::{BudgetDefinition, Category, Month};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<BudgetDefinition>,
}

fn lock_err<T>(e: PoisonError<T>) -> PocketbookError {
    PocketbookError::Storage(format!("Failed to acquire lock: {}", e))
}

fn by_label(list: &mut [BudgetDefinition]) {
    list.sort_by(|a, b| a.category.label().cmp(b.category.label()));
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<(Category, Month), BudgetDefinition>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), PocketbookError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self.budgets.write().map_err(lock_err)?;
        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.key(), budget);
        }

        Ok(())
    }

    /// Save budgets to disk, ordered by month then category label
    pub fn save(&self) -> Result<(), PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_err)?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| {
            a.month
                .cmp(&b.month)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    pub fn get(
        &self,
        category: Category,
        month: Month,
    ) -> Result<Option<BudgetDefinition>, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_err)?;
        Ok(budgets.get(&(category, month)).cloned())
    }

    /// Budgets for one month, sorted by category label
    pub fn get_for_month(&self, month: Month) -> Result<Vec<BudgetDefinition>, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_err)?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.month == month)
            .cloned()
            .collect();
        by_label(&mut list);
        Ok(list)
    }

    /// Every stored budget, ordered by month then category label
    pub fn get_all(&self) -> Result<Vec<BudgetDefinition>, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_err)?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| {
            a.month
                .cmp(&b.month)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });
        Ok(list)
    }

    /// Insert or replace the budget for its (category, month)
    pub fn upsert(&self, budget: BudgetDefinition) -> Result<(), PocketbookError> {
        let mut budgets = self.budgets.write().map_err(lock_err)?;
        budgets.insert(budget.key(), budget);
        Ok(())
    }

    /// Swap the whole set of budgets for a month
    ///
    /// Every existing budget of `month` is dropped and `replacement` inserted.
    /// Returns the dropped budgets, sorted by category label. Fails without
    /// changing anything if a replacement belongs to another month or two
    /// replacements share a category.
    pub fn replace_month(
        &self,
        month: Month,
        replacement: Vec<BudgetDefinition>,
    ) -> Result<Vec<BudgetDefinition>, PocketbookError> {
        let mut seen = HashSet::new();
        for budget in &replacement {
            if budget.month != month {
                return Err(PocketbookError::Validation(format!(
                    "Budget for {} belongs to {}, not {}",
                    budget.category, budget.month, month
                )));
            }
            if !seen.insert(budget.category) {
                return Err(PocketbookError::duplicate_budget(format!(
                    "{} {}",
                    budget.category, month
                )));
            }
        }

        let mut budgets = self.budgets.write().map_err(lock_err)?;

        let keys: Vec<_> = budgets.keys().filter(|(_, m)| *m == month).copied().collect();
        let mut removed: Vec<_> = keys.iter().filter_map(|k| budgets.remove(k)).collect();
        by_label(&mut removed);

        for budget in replacement {
            budgets.insert(budget.key(), budget);
        }

        Ok(removed)
    }

    /// Remove the budget for a (category, month), returning it if present
    pub fn delete(
        &self,
        category: Category,
        month: Month,
    ) -> Result<Option<BudgetDefinition>, PocketbookError> {
        let mut budgets = self.budgets.write().map_err(lock_err)?;
        Ok(budgets.remove(&(category, month)))
    }

    pub fn count(&self) -> Result<usize, PocketbookError> {
        let budgets = self.budgets.read().map_err(lock_err)?;
        Ok(budgets.len())
    }
}
