//! JSON export of the complete data set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{BudgetDefinition, TransactionRecord};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<TransactionRecord>,

    pub budgets: Vec<BudgetDefinition>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,

    pub budget_count: usize,

    pub earliest_transaction: Option<String>,

    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> PocketbookResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets,
            metadata,
        })
    }

    /// Check the schema version and the record invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for txn in &self.transactions {
            if !txn.amount.is_positive() {
                return Err(format!("Transaction {} has a non-positive amount", txn.id));
            }
            if txn.description.trim().is_empty() {
                return Err(format!("Transaction {} has no description", txn.id));
            }
        }

        let mut keys = HashSet::new();
        for budget in &self.budgets {
            if budget.monthly_limit.is_negative() {
                return Err(format!("Budget {} has a negative limit", budget.id));
            }
            if !keys.insert(budget.key()) {
                return Err(format!(
                    "Duplicate budget for {} in {}",
                    budget.category, budget.month
                ));
            }
        }

        Ok(())
    }
}

/// Export the full data set to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: W,
    pretty: bool,
) -> PocketbookResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| PocketbookError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> PocketbookResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| PocketbookError::Export(e.to_string()))?;
    export.validate().map_err(PocketbookError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketbookPaths;
    use crate::models::{Category, Money};
    use crate::test_fixtures::{expense, income};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export_metadata() {
        let (_temp_dir, storage) = create_test_storage();
        storage.transactions.upsert(expense(10, Category::Travel, "2024-01-05")).unwrap();
        storage.transactions.upsert(income(99, Category::Other, "2024-06-30")).unwrap();
        storage
            .budgets
            .upsert(
                BudgetDefinition::new(Category::Travel, Money::from_units(50), "2024-01".parse().unwrap())
                    .unwrap(),
            )
            .unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.budget_count, 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-01-05"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-06-30"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_export_then_import() {
        let (_temp_dir, storage) = create_test_storage();
        storage.transactions.upsert(expense(10, Category::Travel, "2024-01-05")).unwrap();

        let mut buf = Vec::new();
        export_full_json(&storage, &mut buf, true).unwrap();
        let imported = import_from_json(&String::from_utf8(buf).unwrap()).unwrap();
        assert_eq!(imported.transactions.len(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_budgets() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        let month = "2024-03".parse().unwrap();
        export.budgets = vec![
            BudgetDefinition::new(Category::Travel, Money::from_units(1), month).unwrap(),
            BudgetDefinition::new(Category::Travel, Money::from_units(2), month).unwrap(),
        ];

        assert!(export.validate().unwrap_err().contains("Duplicate budget"));
    }

    #[test]
    fn test_import_rejects_wrong_schema() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.schema_version = "0.1.0".into();
        let json = serde_json::to_string(&export).unwrap();

        assert!(matches!(import_from_json(&json), Err(PocketbookError::Export(_))));
    }
}
