//! Budget service
//!
//! Monthly budget definitions and their utilization against recorded
//! expenses.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{BudgetDefinition, Category, Money, Month};
use crate::reports::{budget_utilization, BudgetUtilization};
use crate::storage::Storage;
use crate::validation::ValidationErrors;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

fn audit_name(budget: &BudgetDefinition) -> Option<String> {
    Some(format!("{} {}", budget.category, budget.month))
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Replace every budget of `month` with the given limits
    ///
    /// Limits are validated first; one bad limit rejects the whole set.
    /// Returns the new budgets sorted by category label.
    pub fn set_month(
        &self,
        month: Month,
        limits: &[(Category, Money)],
    ) -> PocketbookResult<Vec<BudgetDefinition>> {
        let mut errors = ValidationErrors::default();
        let mut replacement = Vec::with_capacity(limits.len());
        for (category, limit) in limits {
            match BudgetDefinition::new(*category, *limit, month) {
                Ok(budget) => replacement.push(budget),
                Err(_) => errors.add(
                    format!("monthlyLimit.{}", category.label()),
                    "Monthly limit must be greater than or equal to 0",
                ),
            }
        }
        if !errors.is_empty() {
            return Err(PocketbookError::Invalid(errors));
        }

        let removed = self.storage.budgets.replace_month(month, replacement)?;
        self.storage.budgets.save()?;

        let created = self.storage.budgets.get_for_month(month)?;

        let mut entries: Vec<AuditEntry> = removed
            .iter()
            .map(|b| AuditEntry::delete(EntityType::Budget, b.id.to_string(), audit_name(b), b))
            .collect();
        entries.extend(
            created
                .iter()
                .map(|b| AuditEntry::create(EntityType::Budget, b.id.to_string(), audit_name(b), b)),
        );
        self.storage.audit().log_batch(&entries)?;

        Ok(created)
    }

    /// Remove every budget of `month`, returning how many were removed
    pub fn clear_month(&self, month: Month) -> PocketbookResult<usize> {
        let before = self.storage.budgets.get_for_month(month)?.len();
        self.set_month(month, &[])?;
        Ok(before)
    }

    /// Budgets for a month, sorted by category label
    pub fn list_for_month(&self, month: Month) -> PocketbookResult<Vec<BudgetDefinition>> {
        self.storage.budgets.get_for_month(month)
    }

    pub fn get(
        &self,
        category: Category,
        month: Month,
    ) -> PocketbookResult<Option<BudgetDefinition>> {
        self.storage.budgets.get(category, month)
    }

    /// Utilization of each budget of `month`, in category label order
    pub fn utilization(&self, month: Month) -> PocketbookResult<Vec<BudgetUtilization>> {
        let budgets = self.storage.budgets.get_for_month(month)?;
        let transactions = self.storage.transactions.get_all()?;
        Ok(budget_utilization(&transactions, &budgets, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::PocketbookPaths;
    use crate::test_fixtures::expense;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn march() -> Month {
        "2024-03".parse().unwrap()
    }

    #[test]
    fn test_set_month_replaces_existing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_month(
                march(),
                &[
                    (Category::Travel, Money::from_units(100)),
                    (Category::Groceries, Money::from_units(200)),
                ],
            )
            .unwrap();
        let budgets = service
            .set_month(march(), &[(Category::Shopping, Money::from_units(50))])
            .unwrap();

        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].category, Category::Shopping);

        let log = storage.audit().read_all().unwrap();
        let deletes = log.iter().filter(|e| e.operation == Operation::Delete).count();
        assert_eq!(log.len(), 5);
        assert_eq!(deletes, 2);
    }

    #[test]
    fn test_set_month_rejects_negative_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service
            .set_month(march(), &[(Category::Travel, Money::from_units(100))])
            .unwrap();

        let err = service
            .set_month(
                march(),
                &[
                    (Category::Groceries, Money::from_units(10)),
                    (Category::Shopping, Money::from_cents(-1)),
                ],
            )
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains("monthlyLimit.Shopping"));
        assert_eq!(service.list_for_month(march()).unwrap().len(), 1);
    }

    #[test]
    fn test_set_month_rejects_duplicate_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service
            .set_month(
                march(),
                &[
                    (Category::Groceries, Money::from_units(10)),
                    (Category::Groceries, Money::from_units(20)),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, PocketbookError::Duplicate { .. }));
    }

    #[test]
    fn test_clear_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service
            .set_month(march(), &[(Category::Travel, Money::from_units(100))])
            .unwrap();

        assert_eq!(service.clear_month(march()).unwrap(), 1);
        assert!(service.list_for_month(march()).unwrap().is_empty());
    }

    #[test]
    fn test_utilization_uses_stored_records() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service
            .set_month(
                march(),
                &[
                    (Category::Travel, Money::from_units(100)),
                    (Category::Groceries, Money::from_units(200)),
                ],
            )
            .unwrap();
        storage
            .transactions
            .upsert(expense(250, Category::Groceries, "2024-03-05"))
            .unwrap();
        storage
            .transactions
            .upsert(expense(90, Category::Groceries, "2024-04-05"))
            .unwrap();

        let rows = service.utilization(march()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, Category::Groceries);
        assert_eq!(rows[0].spent, Money::from_units(250));
        assert!(rows[0].is_over_budget);
        assert_eq!(rows[1].spent, Money::zero());
    }
}
