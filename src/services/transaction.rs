//! Transaction service
//!
//! Validation, persistence and audit for income and expense records.

use crate::audit::EntityType;
use crate::error::{PocketbookError, PocketbookResult};
use crate::models::{Category, Month, TransactionId, TransactionKind, TransactionRecord};
use crate::storage::Storage;
use crate::validation::{TransactionDraft, TransactionPayload};

/// Row cap applied when a filter sets no limit
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    pub kind: Option<TransactionKind>,
    pub month: Option<Month>,
    /// Maximum number of transactions to return; `DEFAULT_LIST_LIMIT` if unset
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &TransactionRecord) -> bool {
        self.kind.map_or(true, |k| txn.kind == k) && self.month.map_or(true, |m| txn.month() == m)
    }
}

fn audit_name(txn: &TransactionRecord) -> Option<String> {
    Some(format!("{} {}", txn.date, txn.description))
}

/// Fill the fields a change leaves out from the stored record
fn merge_payload(existing: &TransactionRecord, changes: &TransactionPayload) -> TransactionPayload {
    TransactionPayload {
        amount: changes
            .amount
            .clone()
            .or_else(|| Some(existing.amount.to_string())),
        description: changes
            .description
            .clone()
            .or_else(|| Some(existing.description.clone())),
        category: changes
            .category
            .clone()
            .or_else(|| Some(existing.category.label().to_string())),
        date: changes
            .date
            .clone()
            .or_else(|| Some(existing.date.to_string())),
        kind: changes
            .kind
            .clone()
            .or_else(|| Some(existing.kind.as_str().to_string())),
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate a payload and store it as a new transaction
    pub fn create(&self, payload: &TransactionPayload) -> PocketbookResult<TransactionRecord> {
        let draft = TransactionDraft::from_payload(payload)?;
        let txn = TransactionRecord::new(draft);

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_name(&txn),
            &txn,
        )?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> PocketbookResult<Option<TransactionRecord>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID, short ID or hex prefix
    pub fn find(&self, identifier: &str) -> PocketbookResult<Option<TransactionRecord>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            if let Some(txn) = self.storage.transactions.get(id)? {
                return Ok(Some(txn));
            }
        }
        self.storage.transactions.find(identifier)
    }

    /// Like `find`, but a missing transaction is an error
    pub fn resolve(&self, identifier: &str) -> PocketbookResult<TransactionRecord> {
        self.find(identifier)?
            .ok_or_else(|| PocketbookError::transaction_not_found(identifier))
    }

    /// List transactions newest first, filtered and capped
    pub fn list(&self, filter: &TransactionFilter) -> PocketbookResult<Vec<TransactionRecord>> {
        let mut transactions = match filter.category {
            Some(category) => self.storage.transactions.get_by_category(category)?,
            None => self.storage.transactions.get_all()?,
        };

        transactions.retain(|t| filter.matches(t));
        transactions.truncate(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT));

        Ok(transactions)
    }

    /// Every stored transaction, newest first
    pub fn all(&self) -> PocketbookResult<Vec<TransactionRecord>> {
        self.storage.transactions.get_all()
    }

    /// Apply changes to a stored transaction
    ///
    /// Fields absent from `changes` keep their stored values. The merged
    /// result is validated as a whole before anything is written.
    pub fn update(
        &self,
        identifier: &str,
        changes: &TransactionPayload,
    ) -> PocketbookResult<TransactionRecord> {
        let before = self.resolve(identifier)?;

        let draft = TransactionDraft::from_payload(&merge_payload(&before, changes))?;
        let txn = before.replaced_with(draft);

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_name(&txn),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    pub fn delete(&self, identifier: &str) -> PocketbookResult<TransactionRecord> {
        let txn = self.resolve(identifier)?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            audit_name(&txn),
            &txn,
        )?;

        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::PocketbookPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn payload(amount: &str, category: &str, date: &str, kind: &str) -> TransactionPayload {
        TransactionPayload::new()
            .amount(amount)
            .description("Test entry")
            .category(category)
            .date(date)
            .kind(kind)
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(&payload("42.50", "Groceries", "2024-03-05", "expense"))
            .unwrap();

        assert_eq!(txn.amount, Money::from_cents(4250));
        assert_eq!(txn.category, Category::Groceries);
        assert_eq!(storage.transactions.count().unwrap(), 1);

        let log = storage.audit().read_all().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_invalid_payload() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .create(&payload("0", "Pets", "2024-03-05", "expense"))
            .unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains("amount"));
        assert!(errors.contains("category"));
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_list_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(&payload("10", "Groceries", "2024-03-01", "expense")).unwrap();
        service.create(&payload("20", "Groceries", "2024-04-01", "expense")).unwrap();
        service.create(&payload("30", "Travel", "2024-03-15", "expense")).unwrap();
        service.create(&payload("500", "Other", "2024-03-20", "income")).unwrap();

        let all = service.list(&TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].date.to_string(), "2024-04-01");

        let groceries = service
            .list(&TransactionFilter::new().category(Category::Groceries))
            .unwrap();
        assert_eq!(groceries.len(), 2);

        let march_expenses = service
            .list(
                &TransactionFilter::new()
                    .month("2024-03".parse().unwrap())
                    .kind(TransactionKind::Expense),
            )
            .unwrap();
        assert_eq!(march_expenses.len(), 2);

        let limited = service.list(&TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_default_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        for day in 0..(DEFAULT_LIST_LIMIT + 5) {
            let txn = TransactionRecord::new(
                TransactionDraft::new(
                    Money::from_units(1),
                    "Bulk",
                    Category::Other,
                    TransactionKind::Expense,
                    chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Duration::days(day as i64),
                )
                .unwrap(),
            );
            storage.transactions.upsert(txn).unwrap();
        }

        let listed = service.list(&TransactionFilter::new()).unwrap();
        assert_eq!(listed.len(), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_update_merges_and_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(&payload("10", "Groceries", "2024-03-01", "expense"))
            .unwrap();

        let updated = service
            .update(&txn.id.to_string(), &TransactionPayload::new().category("Travel"))
            .unwrap();
        assert_eq!(updated.id, txn.id);
        assert_eq!(updated.category, Category::Travel);
        assert_eq!(updated.amount, Money::from_units(10));

        let err = service
            .update(&txn.id.to_string(), &TransactionPayload::new().amount("-4"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            service.get(txn.id).unwrap().unwrap().category,
            Category::Travel
        );

        let log = storage.audit().read_all().unwrap();
        assert_eq!(log.len(), 2);
        assert!(log[1]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("\"Groceries\" -> \"Travel\""));
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(&payload("10", "Groceries", "2024-03-01", "expense"))
            .unwrap();

        service.delete(&txn.id.to_string()).unwrap();
        assert!(service.get(txn.id).unwrap().is_none());

        let err = service.delete(&txn.id.to_string()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_full_uuid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(&payload("10", "Groceries", "2024-03-01", "expense"))
            .unwrap();

        let found = service.find(&txn.id.as_uuid().to_string()).unwrap();
        assert_eq!(found.map(|t| t.id), Some(txn.id));
    }
}
